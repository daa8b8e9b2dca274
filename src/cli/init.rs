use crate::core::db::{async_db, initialize};
use anyhow::{Result, anyhow};

pub async fn run(db: bool, vec_db_path: &str) -> Result<()> {
    if !db {
        return Err(anyhow!("Missing value for init \"--db\""));
    }

    println!("Initializing db...");
    let db = async_db(vec_db_path).await?;
    initialize(&db).await?;
    println!("Finished initializing db");

    Ok(())
}
