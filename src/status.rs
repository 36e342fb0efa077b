// System status display: database file, post counts, classifier health.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::db::PostStore;
use crate::output::terminal::display_verdict_counts;

/// Display system status to the terminal.
pub async fn show(store: &Arc<dyn PostStore>, config: &Config) -> Result<()> {
    let file_size = std::fs::metadata(&config.db_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", config.db_path, file_size);

    println!(
        "Classifier: {} (timeout {} ms)",
        config.classifier_url,
        config.classifier_timeout.as_millis()
    );
    match probe_classifier(config).await {
        Ok(()) => println!("  {}", "reachable".green()),
        Err(e) => println!("  {} {}", "unreachable:".yellow(), e),
    }

    let counts = store.verdict_counts().await?;
    display_verdict_counts(&counts);

    Ok(())
}

/// True if the database file exists.
pub fn database_exists(db_path: &str) -> bool {
    Path::new(db_path).exists()
}

async fn probe_classifier(config: &Config) -> Result<()> {
    let url = format!("{}/health", config.classifier_url.trim_end_matches('/'));
    let response = reqwest::Client::builder()
        .timeout(config.classifier_timeout)
        .build()?
        .get(&url)
        .send()
        .await?;
    if !response.status().is_success() {
        anyhow::bail!("health check returned {}", response.status());
    }
    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
