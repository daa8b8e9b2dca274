use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;

use crate::core::db::{async_db, initialize};
use crate::search::{FastEmbedder, VectorIndex};
use crate::seed::{Season, seed_index};

pub async fn run(
    seed: Option<u64>,
    start: NaiveDate,
    end: NaiveDate,
    vec_db_path: &str,
) -> Result<()> {
    let db = async_db(vec_db_path).await?;
    initialize(&db).await?;

    let index = VectorIndex::new(db, Arc::new(FastEmbedder::new()?));
    let count = seed_index(&index, &Season::new(start, end), seed).await?;
    println!("Indexed {} mock inventory passages", count);

    Ok(())
}
