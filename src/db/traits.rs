// Post store trait: backend-agnostic async interface for persistence.
//
// SqliteStore is the shipped implementation. All methods are async so the
// synchronous rusqlite backend (behind a Mutex) and any future native async
// backend fit behind a single interface.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{Post, Verdict, VerdictCounts};

#[async_trait]
pub trait PostStore: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Posts ---

    /// Persist a new post. Its verdict starts out Unknown.
    async fn create_post(&self, title: &str, paragraphs: &[String]) -> Result<Post>;

    /// Load a post by id.
    async fn get_post(&self, id: i64) -> Result<Option<Post>>;

    /// Every post whose verdict is still Unknown, oldest first.
    async fn list_unknown(&self) -> Result<Vec<Post>>;

    /// Resolve an Unknown post. Returns false if nothing changed.
    async fn update_verdict(&self, id: i64, verdict: Verdict) -> Result<bool>;

    /// Number of posts per verdict.
    async fn verdict_counts(&self) -> Result<VerdictCounts>;
}
