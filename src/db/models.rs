// Data models: Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so other modules can use them without depending
// on rusqlite directly.

use serde::{Deserialize, Serialize};

use crate::moderation::traits::FoulLanguageResult;

/// A stored blog post with its paragraphs in their original order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub paragraphs: Vec<String>,
    pub verdict: Verdict,
    pub created_at: String,
    /// When the verdict was resolved (None while it is still Unknown).
    pub checked_at: Option<String>,
}

/// Moderation verdict for a whole post.
///
/// Unknown means "could not be determined". It is stored as its own value
/// and is never conflated with Clean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Clean,
    Foul,
    Unknown,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Clean => "clean",
            Verdict::Foul => "foul",
            Verdict::Unknown => "unknown",
        }
    }

    /// Parse the value stored in the `verdict` column.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "clean" => Some(Verdict::Clean),
            "foul" => Some(Verdict::Foul),
            "unknown" => Some(Verdict::Unknown),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        *self != Verdict::Unknown
    }
}

impl From<FoulLanguageResult> for Verdict {
    fn from(result: FoulLanguageResult) -> Self {
        match result {
            FoulLanguageResult::True => Verdict::Foul,
            FoulLanguageResult::False => Verdict::Clean,
            FoulLanguageResult::Indeterminate => Verdict::Unknown,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Number of posts per verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictCounts {
    pub clean: u64,
    pub foul: u64,
    pub unknown: u64,
}

impl VerdictCounts {
    pub fn total(&self) -> u64 {
        self.clean + self.foul + self.unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_from_result() {
        assert_eq!(Verdict::from(FoulLanguageResult::True), Verdict::Foul);
        assert_eq!(Verdict::from(FoulLanguageResult::False), Verdict::Clean);
        assert_eq!(
            Verdict::from(FoulLanguageResult::Indeterminate),
            Verdict::Unknown
        );
    }

    #[test]
    fn test_verdict_column_values() {
        for verdict in [Verdict::Clean, Verdict::Foul, Verdict::Unknown] {
            assert_eq!(Verdict::parse(verdict.as_str()), Some(verdict));
        }
        assert_eq!(Verdict::parse("maybe"), None);
    }

    #[test]
    fn test_verdict_json_is_lowercase() {
        assert_eq!(serde_json::to_string(&Verdict::Foul).unwrap(), r#""foul""#);
    }
}
