use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::classifier::model::DEFAULT_FOUL_WORDS;

pub const DEFAULT_CLASSIFIER_URL: &str = "http://127.0.0.1:8001";
pub const DEFAULT_CLASSIFIER_TIMEOUT_MS: u64 = 5_000;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy, so every
/// value here can live there instead of the shell environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    /// Base URL of the classification service (POST {url}/sentences/)
    pub classifier_url: String,
    /// Upper bound on a single classification call
    pub classifier_timeout: Duration,
    /// Posts evaluated in parallel by the retry sweep (1 = sequential)
    pub retry_concurrency: usize,
    /// Word list for the stub classification model
    pub foul_words: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default. Numeric variables that are set but don't
    /// parse are an error rather than silently falling back.
    pub fn load() -> Result<Self> {
        let classifier_timeout_ms = match env::var("POSTGUARD_CLASSIFIER_TIMEOUT_MS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("POSTGUARD_CLASSIFIER_TIMEOUT_MS is not a number: {raw}"))?,
            Err(_) => DEFAULT_CLASSIFIER_TIMEOUT_MS,
        };

        let retry_concurrency = match env::var("POSTGUARD_RETRY_CONCURRENCY") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("POSTGUARD_RETRY_CONCURRENCY is not a number: {raw}"))?,
            Err(_) => 1,
        };

        let foul_words = match env::var("POSTGUARD_FOUL_WORDS") {
            Ok(raw) => parse_word_list(&raw),
            Err(_) => DEFAULT_FOUL_WORDS.iter().map(|w| w.to_string()).collect(),
        };

        Ok(Self {
            db_path: env::var("POSTGUARD_DB_PATH").unwrap_or_else(|_| "./postguard.db".to_string()),
            classifier_url: env::var("POSTGUARD_CLASSIFIER_URL")
                .unwrap_or_else(|_| DEFAULT_CLASSIFIER_URL.to_string()),
            classifier_timeout: Duration::from_millis(classifier_timeout_ms),
            retry_concurrency,
            foul_words,
        })
    }

    /// Check that the classifier settings can actually produce answers.
    /// Call this before anything that moderates posts.
    pub fn require_classifier(&self) -> Result<()> {
        if !self.classifier_url.starts_with("http://") && !self.classifier_url.starts_with("https://")
        {
            anyhow::bail!(
                "POSTGUARD_CLASSIFIER_URL must be an http(s) URL, got {:?}.\n\
                 See .env.example for the required variables.",
                self.classifier_url
            );
        }
        if self.classifier_timeout.is_zero() {
            anyhow::bail!("POSTGUARD_CLASSIFIER_TIMEOUT_MS must be greater than zero");
        }
        if self.retry_concurrency == 0 {
            anyhow::bail!("POSTGUARD_RETRY_CONCURRENCY must be at least 1");
        }
        Ok(())
    }
}

/// Split a comma-separated word list, dropping blanks.
fn parse_word_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}
