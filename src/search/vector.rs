//! Nearest neighbor search backed by sqlite-vec

use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use tokio_rusqlite::Connection;
use zerocopy::IntoBytes;

use super::{Embedder, RetrievedPassage, SimilarityIndex};

pub struct VectorIndex {
    db: Connection,
    embedder: Arc<dyn Embedder>,
}

impl VectorIndex {
    pub fn new(db: Connection, embedder: Arc<dyn Embedder>) -> Self {
        Self { db, embedder }
    }

    pub fn db(&self) -> &Connection {
        &self.db
    }

    /// Store passages along with their embeddings. Returns the number
    /// of passages written.
    pub async fn insert(&self, passages: Vec<(Option<String>, String)>) -> Result<usize> {
        if passages.is_empty() {
            return Ok(0);
        }
        let bodies: Vec<String> = passages.iter().map(|(_, body)| body.clone()).collect();
        let embedder = Arc::clone(&self.embedder);
        let embeddings = tokio::task::spawn_blocking(move || embedder.embed(&bodies)).await??;
        if embeddings.len() != passages.len() {
            return Err(anyhow!(
                "Expected {} embeddings, got {}",
                passages.len(),
                embeddings.len()
            ));
        }

        let count = self
            .db
            .call(move |conn| {
                // All passages are written or none are
                let tx = conn.transaction()?;
                {
                    let mut insert_passage =
                        tx.prepare("INSERT INTO passage (source_id, body) VALUES (?, ?)")?;
                    let mut insert_vec =
                        tx.prepare("INSERT INTO vec_passage (rowid, embedding) VALUES (?, ?)")?;
                    for ((source_id, body), embedding) in passages.iter().zip(embeddings.iter()) {
                        insert_passage.execute(rusqlite::params![source_id, body])?;
                        let rowid = tx.last_insert_rowid();
                        insert_vec.execute(rusqlite::params![rowid, embedding.as_bytes()])?;
                    }
                }
                tx.commit()?;
                Ok(passages.len())
            })
            .await?;

        tracing::debug!("Indexed {} passages", count);
        Ok(count)
    }

    pub async fn count(&self) -> Result<usize> {
        let count = self
            .db
            .call(|conn| {
                let count: i64 =
                    conn.query_row("SELECT count(*) FROM passage", [], |r| r.get(0))?;
                Ok(count)
            })
            .await?;
        Ok(count as usize)
    }
}

#[async_trait]
impl SimilarityIndex for VectorIndex {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<RetrievedPassage>> {
        if k == 0 {
            return Ok(vec![]);
        }
        // Inference is CPU bound, keep it off the runtime threads
        let embedder = Arc::clone(&self.embedder);
        let query = query.to_string();
        let embedding = tokio::task::spawn_blocking(move || embedder.embed_one(&query)).await??;
        let k = k as i64;

        let results = self
            .db
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r"
                    SELECT
                      p.body,
                      p.source_id,
                      v.distance
                    FROM vec_passage v
                    JOIN passage p ON p.id = v.rowid
                    WHERE v.embedding MATCH ?
                      AND k = ?
                    ORDER BY v.distance
                    ",
                )?;
                let rows = stmt
                    .query_map(rusqlite::params![embedding.as_bytes(), k], |row| {
                        Ok(RetrievedPassage {
                            content: row.get(0)?,
                            id: row.get(1)?,
                            score: row.get(2)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await?;

        tracing::debug!("Found {} passages for query", results.len());
        Ok(results)
    }
}
