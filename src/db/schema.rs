// Database schema: table creation.
//
// A `schema_version` table records which schema revision the file was
// created with, so later revisions can migrate forward.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent and safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS posts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            verdict TEXT NOT NULL DEFAULT 'unknown'
                CHECK (verdict IN ('clean', 'foul', 'unknown')),
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            checked_at TEXT                    -- set when the verdict resolves
        );

        -- Paragraph text, ordered within a post by position (0-based)
        CREATE TABLE IF NOT EXISTS paragraphs (
            post_id INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            text TEXT NOT NULL,
            PRIMARY KEY (post_id, position)
        );

        -- The retry sweep scans for unknown verdicts
        CREATE INDEX IF NOT EXISTS idx_posts_verdict
            ON posts(verdict);
        ",
    )
    .context("Failed to create database tables")?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
    }

    #[test]
    fn test_table_count() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        // schema_version, posts, paragraphs
        assert_eq!(table_count(&conn).unwrap(), 3i64);
    }

    #[test]
    fn test_verdict_check_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO posts (title, verdict) VALUES ('t', 'maybe')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_new_post_defaults_to_unknown() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn.execute("INSERT INTO posts (title) VALUES ('t')", [])
            .unwrap();
        let verdict: String = conn
            .query_row("SELECT verdict FROM posts", [], |row| row.get(0))
            .unwrap();
        assert_eq!(verdict, "unknown");
    }
}
