use std::sync::Arc;

use anyhow::Result;
use serde_json::json;

use crate::core::db::async_db;
use crate::search::{FastEmbedder, SimilarityIndex, VectorIndex};

pub async fn run(term: String, limit: usize, vec_db_path: &str) -> Result<()> {
    let db = async_db(vec_db_path).await?;
    let index = VectorIndex::new(db, Arc::new(FastEmbedder::new()?));
    let results = index.search(&term, limit).await?;
    println!(
        "{}",
        json!({
            "query": term,
            "results": results,
        })
    );
    Ok(())
}
