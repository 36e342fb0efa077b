// Classifier trait: the seam between the orchestrator and whatever
// actually decides whether a sentence contains foul language.
//
// The default implementation calls the classification service over HTTP.
// Tests swap in scripted classifiers without touching the orchestrator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Outcome of classifying a single fragment (or a whole post).
///
/// `Indeterminate` is a first-class outcome meaning the classifier could
/// not be reached or gave an unusable answer. It is never treated as `False`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoulLanguageResult {
    True,
    False,
    Indeterminate,
}

impl FoulLanguageResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoulLanguageResult::True => "true",
            FoulLanguageResult::False => "false",
            FoulLanguageResult::Indeterminate => "indeterminate",
        }
    }
}

impl From<bool> for FoulLanguageResult {
    fn from(has_foul_language: bool) -> Self {
        if has_foul_language {
            FoulLanguageResult::True
        } else {
            FoulLanguageResult::False
        }
    }
}

impl std::fmt::Display for FoulLanguageResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trait for classifying one sentence fragment.
///
/// Infallible by signature: every failure mode collapses into
/// `FoulLanguageResult::Indeterminate` inside the implementation, so the
/// moderation subsystem can only ever degrade a verdict, never a request.
#[async_trait]
pub trait FoulLanguageClassifier: Send + Sync {
    async fn classify(&self, fragment: &str) -> FoulLanguageResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bool() {
        assert_eq!(FoulLanguageResult::from(true), FoulLanguageResult::True);
        assert_eq!(FoulLanguageResult::from(false), FoulLanguageResult::False);
    }

    #[test]
    fn test_serializes_snake_case() {
        let json = serde_json::to_string(&FoulLanguageResult::Indeterminate).unwrap();
        assert_eq!(json, r#""indeterminate""#);
    }
}
