//! sqlite storage for indexed passages and their embeddings
use std::fs;
use std::path::Path;
use std::sync::Once;

use anyhow::Result;
use rusqlite::ffi::sqlite3_auto_extension;
use sqlite_vec::sqlite3_vec_init;
use tokio_rusqlite::Connection;

use crate::search::EMBEDDING_DIMENSIONS;

pub const DB_FILE_NAME: &str = "concierge.sqlite";

static REGISTER_VEC: Once = Once::new();

/// Make the `vec0` virtual table available to every connection opened
/// afterwards.
pub fn register_sqlite_vec() {
    REGISTER_VEC.call_once(|| unsafe {
        #[allow(clippy::missing_transmute_annotations)]
        sqlite3_auto_extension(Some(std::mem::transmute(sqlite3_vec_init as *const ())));
    });
}

/// Open the database stored in the `vec_db_path` directory, creating
/// the directory if needed
pub async fn async_db(vec_db_path: &str) -> Result<Connection> {
    register_sqlite_vec();
    fs::create_dir_all(vec_db_path)?;
    let path = Path::new(vec_db_path).join(DB_FILE_NAME);
    let db = Connection::open(path).await?;
    Ok(db)
}

pub async fn in_memory_db() -> Result<Connection> {
    register_sqlite_vec();
    let db = Connection::open_in_memory().await?;
    Ok(db)
}

pub fn initialize_db(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    conn.execute_batch(&format!(
        r"
        BEGIN;
        CREATE TABLE IF NOT EXISTS passage (
            id INTEGER PRIMARY KEY,
            source_id TEXT,
            body TEXT NOT NULL
        );
        CREATE VIRTUAL TABLE IF NOT EXISTS vec_passage USING vec0(
            embedding float[{}]
        );
        COMMIT;
        ",
        EMBEDDING_DIMENSIONS
    ))?;
    Ok(())
}

/// Remove every passage and embedding
pub fn reset_db(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r"
        BEGIN;
        DELETE FROM vec_passage;
        DELETE FROM passage;
        COMMIT;
        ",
    )?;
    Ok(())
}

pub async fn initialize(db: &Connection) -> Result<()> {
    db.call(|conn| {
        initialize_db(conn)?;
        Ok(())
    })
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let db = in_memory_db().await.unwrap();
        initialize(&db).await.unwrap();
        initialize(&db).await.unwrap();

        let count: i64 = db
            .call(|conn| {
                let count = conn.query_row("SELECT count(*) FROM passage", [], |r| r.get(0))?;
                Ok(count)
            })
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_on_disk_db() {
        let dir = tempfile::tempdir().unwrap();
        let db_dir = dir.path().join("db");
        let db = async_db(db_dir.to_str().unwrap()).await.unwrap();
        initialize(&db).await.unwrap();
        assert!(db_dir.join(DB_FILE_NAME).exists());
    }
}
