// HTTP moderation client: calls the classification service for one fragment.
//
// Wire format: POST {base}/sentences/ with {"fragment": "..."} and a
// {"hasFoulLanguage": bool} response. Anything else (transport errors,
// timeouts, non-2xx statuses, bodies without the flag) is Indeterminate.
//
// There are no retries here. Unresolved posts are picked up again by the
// retry sweep at whole-post granularity.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::traits::{FoulLanguageClassifier, FoulLanguageResult};
use crate::output::truncate_chars;

/// Why a classification attempt produced no usable answer.
#[derive(Debug, Error)]
pub enum ClassifyFailure {
    #[error("classification request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("classification endpoint returned {0}")]
    Status(StatusCode),
    #[error("malformed classification response: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Request body for the classification endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceRequest {
    pub fragment: String,
}

/// Response body from the classification endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceResponse {
    pub has_foul_language: bool,
}

/// Classifier backed by the HTTP classification service.
pub struct HttpClassifier {
    client: Client,
    endpoint: String,
}

impl HttpClassifier {
    /// Build a client for the service at `base_url`. Every call is bounded
    /// by `timeout` so an unresponsive service yields Indeterminate instead
    /// of hanging the request.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build classifier HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!("{}/sentences/", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Make the call and report exactly what went wrong, if anything.
    pub async fn try_classify(&self, fragment: &str) -> Result<bool, ClassifyFailure> {
        let request = SentenceRequest {
            fragment: fragment.to_string(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(ClassifyFailure::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyFailure::Status(status));
        }

        let body = response.bytes().await.map_err(ClassifyFailure::Transport)?;
        let parsed: SentenceResponse =
            serde_json::from_slice(&body).map_err(ClassifyFailure::Malformed)?;

        Ok(parsed.has_foul_language)
    }
}

#[async_trait]
impl FoulLanguageClassifier for HttpClassifier {
    async fn classify(&self, fragment: &str) -> FoulLanguageResult {
        match self.try_classify(fragment).await {
            Ok(has_foul_language) => {
                debug!(
                    has_foul_language,
                    fragment = %truncate_chars(fragment, 50),
                    "Classified fragment"
                );
                FoulLanguageResult::from(has_foul_language)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    endpoint = %self.endpoint,
                    fragment = %truncate_chars(fragment, 50),
                    "Classification failed, treating as indeterminate"
                );
                FoulLanguageResult::Indeterminate
            }
        }
    }
}
