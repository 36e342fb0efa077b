// Database queries: CRUD operations for posts and paragraphs.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{Post, Verdict, VerdictCounts};

/// Raw `posts` row before the verdict text is parsed and paragraphs attached.
type PostRow = (i64, String, String, String, Option<String>);

const POST_COLUMNS: &str = "id, title, verdict, created_at, checked_at";

// --- Posts ---

/// Insert a post and its paragraphs in one transaction.
///
/// The post starts out Unknown; the caller attaches the moderation verdict
/// afterwards with `update_verdict`.
pub fn create_post(conn: &Connection, title: &str, paragraphs: &[String]) -> Result<Post> {
    let tx = conn
        .unchecked_transaction()
        .context("Failed to begin post transaction")?;

    tx.execute("INSERT INTO posts (title) VALUES (?1)", params![title])?;
    let id = tx.last_insert_rowid();

    {
        let mut stmt =
            tx.prepare("INSERT INTO paragraphs (post_id, position, text) VALUES (?1, ?2, ?3)")?;
        for (position, text) in paragraphs.iter().enumerate() {
            stmt.execute(params![id, position as i64, text])?;
        }
    }

    tx.commit().context("Failed to commit post")?;

    get_post(conn, id)?.with_context(|| format!("Post {id} vanished after insert"))
}

/// Load a post with its paragraphs, or None if the id doesn't exist.
pub fn get_post(conn: &Connection, id: i64) -> Result<Option<Post>> {
    let mut stmt = conn.prepare(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?1"))?;
    let row: Option<PostRow> = stmt
        .query_row(params![id], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
        })
        .optional()?;

    match row {
        Some(row) => Ok(Some(assemble_post(conn, row)?)),
        None => Ok(None),
    }
}

/// All posts whose verdict is still Unknown, oldest first.
pub fn list_unknown(conn: &Connection) -> Result<Vec<Post>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {POST_COLUMNS} FROM posts WHERE verdict = 'unknown' ORDER BY id"
    ))?;

    let rows = stmt.query_map([], |row| {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
    })?;

    let mut pending: Vec<PostRow> = Vec::new();
    for row in rows {
        pending.push(row?);
    }

    pending
        .into_iter()
        .map(|row| assemble_post(conn, row))
        .collect()
}

/// Resolve an Unknown post to Clean or Foul.
///
/// Returns true if the row changed. Posts that are already resolved are left
/// alone, and writing Unknown is refused: a verdict never goes back.
pub fn update_verdict(conn: &Connection, id: i64, verdict: Verdict) -> Result<bool> {
    if !verdict.is_resolved() {
        anyhow::bail!("Refusing to set post {id} back to unknown");
    }

    let changed = conn.execute(
        "UPDATE posts SET verdict = ?1, checked_at = datetime('now')
         WHERE id = ?2 AND verdict = 'unknown'",
        params![verdict.as_str(), id],
    )?;
    Ok(changed > 0)
}

/// Count posts per verdict.
pub fn verdict_counts(conn: &Connection) -> Result<VerdictCounts> {
    let mut stmt = conn.prepare("SELECT verdict, COUNT(*) FROM posts GROUP BY verdict")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut counts = VerdictCounts::default();
    for row in rows {
        let (raw, count) = row?;
        let count = count as u64;
        match parse_verdict(&raw)? {
            Verdict::Clean => counts.clean = count,
            Verdict::Foul => counts.foul = count,
            Verdict::Unknown => counts.unknown = count,
        }
    }
    Ok(counts)
}

// --- Helpers ---

/// Paragraph text for a post in insertion order.
fn load_paragraphs(conn: &Connection, post_id: i64) -> Result<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT text FROM paragraphs WHERE post_id = ?1 ORDER BY position")?;
    let rows = stmt.query_map(params![post_id], |row| row.get(0))?;

    let mut paragraphs = Vec::new();
    for row in rows {
        paragraphs.push(row?);
    }
    Ok(paragraphs)
}

fn assemble_post(conn: &Connection, row: PostRow) -> Result<Post> {
    let (id, title, verdict, created_at, checked_at) = row;
    Ok(Post {
        id,
        title,
        paragraphs: load_paragraphs(conn, id)?,
        verdict: parse_verdict(&verdict)?,
        created_at,
        checked_at,
    })
}

fn parse_verdict(raw: &str) -> Result<Verdict> {
    Verdict::parse(raw).with_context(|| format!("Unrecognized verdict in database: {raw}"))
}
