// SqliteStore: rusqlite backend implementing the PostStore trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across a classifier call, and a single connection
// gives read-your-writes for every post.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{Post, Verdict, VerdictCounts};
use super::traits::PostStore;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Fresh in-memory store with the schema applied.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        super::schema::create_tables(&conn)?;
        Ok(Self::new(conn))
    }
}

#[async_trait]
impl PostStore for SqliteStore {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn create_post(&self, title: &str, paragraphs: &[String]) -> Result<Post> {
        let conn = self.conn.lock().await;
        super::queries::create_post(&conn, title, paragraphs)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>> {
        let conn = self.conn.lock().await;
        super::queries::get_post(&conn, id)
    }

    async fn list_unknown(&self) -> Result<Vec<Post>> {
        let conn = self.conn.lock().await;
        super::queries::list_unknown(&conn)
    }

    async fn update_verdict(&self, id: i64, verdict: Verdict) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::update_verdict(&conn, id, verdict)
    }

    async fn verdict_counts(&self) -> Result<VerdictCounts> {
        let conn = self.conn.lock().await;
        super::queries::verdict_counts(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_trait_create_and_get_roundtrip() {
        let store = SqliteStore::in_memory().unwrap();
        let paragraphs = texts(&["First one. Second one.", "Another paragraph."]);
        let created = store.create_post("Title", &paragraphs).await.unwrap();

        let loaded = store.get_post(created.id).await.unwrap().unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.paragraphs, paragraphs);
    }

    #[tokio::test]
    async fn test_trait_read_your_writes_after_update() {
        let store = SqliteStore::in_memory().unwrap();
        let post = store.create_post("t", &texts(&["p"])).await.unwrap();
        assert!(store.update_verdict(post.id, Verdict::Foul).await.unwrap());

        let loaded = store.get_post(post.id).await.unwrap().unwrap();
        assert_eq!(loaded.verdict, Verdict::Foul);
        assert!(store.list_unknown().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_trait_table_count() {
        let store = SqliteStore::in_memory().unwrap();
        assert_eq!(store.table_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_trait_verdict_counts() {
        let store = SqliteStore::in_memory().unwrap();
        store.create_post("a", &[]).await.unwrap();
        let counts = store.verdict_counts().await.unwrap();
        assert_eq!(counts.unknown, 1);
        assert_eq!(counts.total(), 1);
    }
}
