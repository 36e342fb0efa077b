// Retry sweep: re-moderate every post whose verdict is still Unknown.
//
// Posts are independent: one that is still indeterminate stays Unknown for
// the next sweep and does not hold up the others. Evaluations may run with
// bounded concurrency; the resulting verdicts are written back one post at a
// time, each with a single UPDATE.

use anyhow::Result;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info};

use crate::db::models::Verdict;
use crate::db::PostStore;
use crate::moderation::orchestrator;
use crate::moderation::traits::FoulLanguageClassifier;

/// What a sweep did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RetrySummary {
    /// Unknown posts found at the start of the sweep
    pub checked: usize,
    /// Posts resolved to Clean or Foul by this sweep
    pub updated: usize,
    /// Posts left Unknown because moderation was still indeterminate
    pub still_unknown: usize,
}

/// Run the retry sweep. `concurrency` is the number of posts evaluated at
/// once; 1 processes them strictly in order.
pub async fn retry_unchecked(
    store: &dyn PostStore,
    classifier: &dyn FoulLanguageClassifier,
    concurrency: usize,
) -> Result<RetrySummary> {
    let pending = store.list_unknown().await?;
    if pending.is_empty() {
        info!("No unchecked posts to retry");
        return Ok(RetrySummary::default());
    }

    info!(count = pending.len(), concurrency, "Retrying unchecked posts");

    let results: Vec<(i64, Verdict)> = stream::iter(pending.into_iter().map(|post| async move {
        let result = orchestrator::evaluate(classifier, &post.paragraphs).await;
        (post.id, Verdict::from(result))
    }))
    .buffer_unordered(concurrency.max(1))
    .collect()
    .await;

    let mut summary = RetrySummary {
        checked: results.len(),
        ..RetrySummary::default()
    };

    for (post_id, verdict) in results {
        if !verdict.is_resolved() {
            debug!(post_id, "Still indeterminate, leaving for a later sweep");
            summary.still_unknown += 1;
            continue;
        }

        if store.update_verdict(post_id, verdict).await? {
            debug!(post_id, verdict = %verdict, "Verdict resolved");
            summary.updated += 1;
        }
    }

    info!(
        checked = summary.checked,
        updated = summary.updated,
        still_unknown = summary.still_unknown,
        "Retry sweep finished"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteStore;
    use crate::moderation::traits::FoulLanguageResult;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Indeterminate while "down"; otherwise foul iff the fragment mentions "darn".
    struct FlakyClassifier {
        up: AtomicBool,
        calls: AtomicUsize,
    }

    impl FlakyClassifier {
        fn down() -> Self {
            Self {
                up: AtomicBool::new(false),
                calls: AtomicUsize::new(0),
            }
        }

        fn recover(&self) {
            self.up.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl FoulLanguageClassifier for FlakyClassifier {
        async fn classify(&self, fragment: &str) -> FoulLanguageResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.up.load(Ordering::SeqCst) {
                return FoulLanguageResult::Indeterminate;
            }
            FoulLanguageResult::from(fragment.contains("darn"))
        }
    }

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_nothing_to_retry() {
        let store = SqliteStore::in_memory().unwrap();
        let classifier = FlakyClassifier::down();
        let summary = retry_unchecked(&store, &classifier, 1).await.unwrap();
        assert_eq!(summary, RetrySummary::default());
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_outage_leaves_posts_unknown() {
        let store = SqliteStore::in_memory().unwrap();
        store.create_post("a", &texts(&["Fine text."])).await.unwrap();
        store.create_post("b", &texts(&["More text."])).await.unwrap();

        let summary = retry_unchecked(&store, &FlakyClassifier::down(), 1)
            .await
            .unwrap();

        assert_eq!(summary.checked, 2);
        assert_eq!(summary.updated, 0);
        assert_eq!(summary.still_unknown, 2);
        assert_eq!(store.list_unknown().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_recovered_classifier_resolves_posts() {
        let store = SqliteStore::in_memory().unwrap();
        let clean = store.create_post("a", &texts(&["Fine text."])).await.unwrap();
        let foul = store
            .create_post("b", &texts(&["Well. This is darn rude."]))
            .await
            .unwrap();

        let classifier = FlakyClassifier::down();
        classifier.recover();
        let summary = retry_unchecked(&store, &classifier, 1).await.unwrap();

        assert_eq!(summary.updated, 2);
        assert_eq!(summary.still_unknown, 0);
        let clean = store.get_post(clean.id).await.unwrap().unwrap();
        let foul = store.get_post(foul.id).await.unwrap().unwrap();
        assert_eq!(clean.verdict, Verdict::Clean);
        assert_eq!(foul.verdict, Verdict::Foul);
    }

    #[tokio::test]
    async fn test_resolved_posts_are_not_rechecked() {
        let store = SqliteStore::in_memory().unwrap();
        let done = store.create_post("done", &texts(&["Old."])).await.unwrap();
        store.update_verdict(done.id, Verdict::Clean).await.unwrap();
        store.create_post("pending", &texts(&["New."])).await.unwrap();

        let classifier = FlakyClassifier::down();
        classifier.recover();
        let summary = retry_unchecked(&store, &classifier, 1).await.unwrap();

        assert_eq!(summary.checked, 1);
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_sweep_is_idempotent() {
        let store = SqliteStore::in_memory().unwrap();
        for title in ["a", "b", "c"] {
            store
                .create_post(title, &texts(&["One sentence. Two darn sentences."]))
                .await
                .unwrap();
        }
        let classifier = FlakyClassifier::down();
        classifier.recover();

        let first = retry_unchecked(&store, &classifier, 1).await.unwrap();
        let after_first = store.verdict_counts().await.unwrap();
        let second = retry_unchecked(&store, &classifier, 1).await.unwrap();
        let after_second = store.verdict_counts().await.unwrap();

        assert_eq!(first.updated, 3);
        assert_eq!(second, RetrySummary::default());
        assert_eq!(after_first, after_second);
        assert_eq!(after_second.foul, 3);
    }

    #[tokio::test]
    async fn test_concurrent_sweep_resolves_every_post() {
        let store = SqliteStore::in_memory().unwrap();
        for i in 0..10 {
            let body = if i % 2 == 0 { "Calm words." } else { "A darn mess." };
            store
                .create_post(&format!("post {i}"), &texts(&[body]))
                .await
                .unwrap();
        }
        let classifier = FlakyClassifier::down();
        classifier.recover();

        let summary = retry_unchecked(&store, &classifier, 4).await.unwrap();

        assert_eq!(summary.updated, 10);
        let counts = store.verdict_counts().await.unwrap();
        assert_eq!(counts.clean, 5);
        assert_eq!(counts.foul, 5);
        assert_eq!(counts.unknown, 0);
    }
}
