// Word-list model: flags a fragment when any of its words is on the list.
//
// Matching is whole-word and case-insensitive, so "hell" does not flag
// "hello" and "Damn" flags the same as "damn".

use std::collections::HashSet;
use std::sync::OnceLock;

use regex_lite::Regex;

/// Used when POSTGUARD_FOUL_WORDS isn't set.
pub const DEFAULT_FOUL_WORDS: &[&str] = &[
    "arse", "asshole", "bastard", "bitch", "bollocks", "crap", "damn", "fuck", "shit",
];

static WORD: OnceLock<Regex> = OnceLock::new();

fn word() -> &'static Regex {
    WORD.get_or_init(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").expect("word pattern is valid"))
}

#[derive(Debug, Clone)]
pub struct WordListModel {
    words: HashSet<String>,
}

impl WordListModel {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// True if the fragment contains a listed word.
    pub fn has_foul_language(&self, fragment: &str) -> bool {
        let lowered = fragment.to_lowercase();
        word()
            .find_iter(&lowered)
            .any(|m| self.words.contains(m.as_str()))
    }
}

impl Default for WordListModel {
    fn default() -> Self {
        Self::new(DEFAULT_FOUL_WORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_sentence() {
        let model = WordListModel::default();
        assert!(!model.has_foul_language("This is a test sentence with no foul language"));
    }

    #[test]
    fn test_foul_word_any_case() {
        let model = WordListModel::default();
        assert!(model.has_foul_language("Well, DAMN that was close."));
        assert!(model.has_foul_language("crap"));
    }

    #[test]
    fn test_whole_word_matching() {
        let model = WordListModel::new(["hell"]);
        assert!(!model.has_foul_language("hello there, shellfish"));
        assert!(model.has_foul_language("What the hell."));
    }

    #[test]
    fn test_custom_list_is_normalized() {
        let model = WordListModel::new([" Heck ", "", "GOSH"]);
        assert_eq!(model.len(), 2);
        assert!(model.has_foul_language("oh gosh"));
        assert!(model.has_foul_language("heck no"));
    }

    #[test]
    fn test_empty_fragment_is_clean() {
        assert!(!WordListModel::default().has_foul_language(""));
    }
}
