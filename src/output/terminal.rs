// Colored terminal output for posts, verdicts and sweep results.
//
// This module handles all terminal-specific formatting. The main.rs
// command arms delegate here.

use colored::Colorize;

use crate::db::models::{Post, Verdict, VerdictCounts};
use crate::moderation::traits::FoulLanguageResult;
use crate::pipeline::retry::RetrySummary;

/// Display a single stored post.
pub fn display_post(post: &Post) {
    println!("\n{}", format!("=== Post #{}: {} ===", post.id, post.title).bold());
    println!("  Verdict: {}", colorize_verdict(post.verdict));
    println!("  Created: {}", post.created_at);
    match &post.checked_at {
        Some(checked) => println!("  Checked: {checked}"),
        None => println!("  Checked: {}", "not yet".dimmed()),
    }

    println!("\n  {} paragraphs:", post.paragraphs.len());
    for (i, paragraph) in post.paragraphs.iter().enumerate() {
        println!(
            "    {}. {}",
            i + 1,
            super::truncate_chars(paragraph, 120).dimmed()
        );
    }
}

/// Display post counts per verdict.
pub fn display_verdict_counts(counts: &VerdictCounts) {
    println!("Posts: {} total", counts.total());
    println!("  {:<8} {}", colorize_verdict(Verdict::Clean), counts.clean);
    println!("  {:<8} {}", colorize_verdict(Verdict::Foul), counts.foul);
    println!("  {:<8} {}", colorize_verdict(Verdict::Unknown), counts.unknown);

    if counts.unknown > 0 {
        println!(
            "{}",
            "  Run `postguard retry` to re-check unknown posts.".dimmed()
        );
    }
}

/// Display the result of a retry sweep.
pub fn display_retry_summary(summary: &RetrySummary) {
    println!("\n{}", "Retry sweep complete.".bold());
    println!("  Posts checked: {}", summary.checked);
    println!("  Resolved: {}", summary.updated.to_string().green());
    if summary.still_unknown > 0 {
        println!(
            "  Still unknown: {} (classifier unavailable?)",
            summary.still_unknown.to_string().yellow()
        );
    }
}

/// Display per-sentence results from `postguard check`.
pub fn display_sentence_checks(checks: &[(String, FoulLanguageResult)], overall: FoulLanguageResult) {
    for (i, (sentence, result)) in checks.iter().enumerate() {
        println!(
            "  {:>3}. [{}] {}",
            i + 1,
            colorize_result(*result),
            super::truncate_chars(sentence, 100)
        );
    }
    println!(
        "\n  Post verdict: {}",
        colorize_verdict(Verdict::from(overall))
    );
}

fn colorize_verdict(verdict: Verdict) -> colored::ColoredString {
    match verdict {
        Verdict::Clean => verdict.as_str().green(),
        Verdict::Foul => verdict.as_str().red().bold(),
        Verdict::Unknown => verdict.as_str().yellow(),
    }
}

fn colorize_result(result: FoulLanguageResult) -> colored::ColoredString {
    match result {
        FoulLanguageResult::True => "foul ".red().bold(),
        FoulLanguageResult::False => "clean".green(),
        FoulLanguageResult::Indeterminate => "  ?  ".yellow(),
    }
}
