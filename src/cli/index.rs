use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, anyhow};

use crate::core::db::{async_db, initialize, reset_db};
use crate::search::{FastEmbedder, VectorIndex, index_directory};

pub async fn run(path: &str, chunk_size: usize, reset: bool, vec_db_path: &str) -> Result<()> {
    let dir = Path::new(path);
    if !dir.is_dir() {
        return Err(anyhow!("{} is not a directory", path));
    }

    let db = async_db(vec_db_path).await?;
    initialize(&db).await?;
    if reset {
        db.call(|conn| {
            reset_db(conn)?;
            Ok(())
        })
        .await?;
        tracing::info!("Cleared existing passages");
    }

    let index = VectorIndex::new(db, Arc::new(FastEmbedder::new()?));
    let count = index_directory(&index, dir, chunk_size).await?;
    println!("Indexed {} passages from {}", count, path);

    Ok(())
}
