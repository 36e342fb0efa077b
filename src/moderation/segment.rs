// Sentence segmentation: a heuristic splitter, not a linguistic parser.
//
// A sentence ends wherever a period is followed by a single space and an
// uppercase ASCII letter. The period stays with the sentence it closes and
// the uppercase letter opens the next one. Abbreviations like "Mr. Smith"
// are split too; callers accept that.

use std::sync::OnceLock;

use regex_lite::Regex;

static BOUNDARY: OnceLock<Regex> = OnceLock::new();

fn boundary() -> &'static Regex {
    BOUNDARY.get_or_init(|| Regex::new(r"\. [A-Z]").expect("sentence boundary pattern is valid"))
}

/// Split a paragraph into trimmed sentences, in order.
///
/// Always returns at least one element. A paragraph without any boundary is
/// a single sentence, and an empty paragraph yields one empty sentence
/// rather than nothing, so every paragraph costs at least one classifier call.
pub fn segment(paragraph: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for found in boundary().find_iter(paragraph) {
        // Match is ". X" (three ASCII bytes): keep the period, restart at X.
        let end = found.start() + 1;
        sentences.push(paragraph[start..end].trim().to_string());
        start = found.end() - 1;
    }

    sentences.push(paragraph[start..].trim().to_string());
    sentences
}
