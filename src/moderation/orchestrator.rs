// Moderation orchestrator: turns a post's paragraphs into one verdict.
//
// Sentences are classified one at a time in reading order (paragraph order,
// then sentence order). The first True or Indeterminate ends the evaluation,
// which bounds the number of blocking classifier calls per post.

use tracing::debug;

use super::segment::segment;
use super::traits::{FoulLanguageClassifier, FoulLanguageResult};

/// Evaluate a post's paragraphs.
///
/// - True as soon as any sentence is foul; later sentences are never sent.
/// - Indeterminate as soon as any sentence cannot be classified, even if a
///   later sentence would have come back True.
/// - False only when every sentence came back False (including the case of
///   a post with no paragraphs at all).
pub async fn evaluate(
    classifier: &dyn FoulLanguageClassifier,
    paragraphs: &[String],
) -> FoulLanguageResult {
    let mut calls = 0usize;

    for (paragraph_index, paragraph) in paragraphs.iter().enumerate() {
        for sentence in segment(paragraph) {
            calls += 1;
            let result = classifier.classify(&sentence).await;

            if result != FoulLanguageResult::False {
                debug!(
                    paragraph_index,
                    calls,
                    result = %result,
                    "Evaluation short-circuited"
                );
                return result;
            }
        }
    }

    debug!(paragraphs = paragraphs.len(), calls, "All sentences clean");
    FoulLanguageResult::False
}

/// Reduce results that were gathered eagerly, in reading order, with the
/// same precedence `evaluate` applies lazily: the first non-False result
/// decides, otherwise False.
pub fn reduce<I>(results: I) -> FoulLanguageResult
where
    I: IntoIterator<Item = FoulLanguageResult>,
{
    results
        .into_iter()
        .find(|r| *r != FoulLanguageResult::False)
        .unwrap_or(FoulLanguageResult::False)
}
