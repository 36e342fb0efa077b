// Post submission: store first, then moderate, then attach the verdict.
//
// Storage errors fail the request. Moderation failures only ever degrade the
// verdict to Unknown, which the retry sweep picks up later.

use anyhow::{Context, Result};
use tracing::info;

use crate::db::models::{Post, Verdict};
use crate::db::PostStore;
use crate::moderation::orchestrator;
use crate::moderation::traits::FoulLanguageClassifier;

/// Create a post and moderate it. Returns the post as stored, including
/// its final verdict.
pub async fn create_post(
    store: &dyn PostStore,
    classifier: &dyn FoulLanguageClassifier,
    title: &str,
    paragraphs: &[String],
) -> Result<Post> {
    let post = store.create_post(title, paragraphs).await?;

    let verdict = Verdict::from(orchestrator::evaluate(classifier, &post.paragraphs).await);
    if verdict.is_resolved() {
        store.update_verdict(post.id, verdict).await?;
    }

    info!(
        post_id = post.id,
        paragraphs = post.paragraphs.len(),
        verdict = %verdict,
        "Post created"
    );

    store
        .get_post(post.id)
        .await?
        .with_context(|| format!("Post {} missing right after creation", post.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteStore;
    use crate::moderation::traits::FoulLanguageResult;
    use async_trait::async_trait;

    struct Always(FoulLanguageResult);

    #[async_trait]
    impl FoulLanguageClassifier for Always {
        async fn classify(&self, _fragment: &str) -> FoulLanguageResult {
            self.0
        }
    }

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_clean_post_is_stored_clean() {
        let store = SqliteStore::in_memory().unwrap();
        let paragraphs = texts(&[
            "This is the first paragraph. It contains two sentences.",
            "Third paragraph here.",
        ]);

        let post = create_post(&store, &Always(FoulLanguageResult::False), "Hi", &paragraphs)
            .await
            .unwrap();

        assert_eq!(post.verdict, Verdict::Clean);
        assert_eq!(post.paragraphs, paragraphs);
        let stored = store.get_post(post.id).await.unwrap().unwrap();
        assert_eq!(stored.verdict, Verdict::Clean);
    }

    #[tokio::test]
    async fn test_foul_post_is_stored_foul() {
        let store = SqliteStore::in_memory().unwrap();
        let post = create_post(
            &store,
            &Always(FoulLanguageResult::True),
            "Hi",
            &texts(&["Anything at all."]),
        )
        .await
        .unwrap();
        assert_eq!(post.verdict, Verdict::Foul);
    }

    #[tokio::test]
    async fn test_unreachable_classifier_still_creates_post() {
        let store = SqliteStore::in_memory().unwrap();
        let post = create_post(
            &store,
            &Always(FoulLanguageResult::Indeterminate),
            "Hi",
            &texts(&["Anything at all."]),
        )
        .await
        .unwrap();

        assert_eq!(post.verdict, Verdict::Unknown);
        assert!(post.checked_at.is_none());
        assert_eq!(store.list_unknown().await.unwrap().len(), 1);
    }
}
