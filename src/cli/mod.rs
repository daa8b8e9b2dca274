use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::AppConfig;
use crate::search::DEFAULT_CHUNK_SIZE;

pub mod chat;
pub mod index;
pub mod init;
pub mod query;
pub mod seed;
pub mod serve;

#[derive(Subcommand)]
enum Command {
    /// Initialize the passage database
    Init {
        #[arg(long, action, default_value = "false")]
        db: bool,
    },
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2222")]
        port: String,
    },
    /// Index text and markdown documents from a directory
    Index {
        #[arg(long)]
        path: String,
        /// Maximum characters per passage
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
        /// Remove all existing passages first
        #[arg(long, default_value = "false")]
        reset: bool,
    },
    /// Generate mock travel inventory and index it
    Seed {
        /// Seed for reproducible inventory
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "2025-07-01")]
        start: NaiveDate,
        #[arg(long, default_value = "2025-12-31")]
        end: NaiveDate,
    },
    /// Query the similarity index
    Query {
        #[arg(long)]
        term: String,
        #[arg(long, default_value = "5")]
        limit: usize,
    },
    /// Start an interactive travel assistant session
    Chat {},
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

/// Log to stdout, honoring `RUST_LOG` when set
fn init_tracing(default_filter: String) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // A missing .env file is fine, the environment may already be set
    let _ = dotenvy::dotenv();

    match &args.command {
        // axum logs rejections from built-in extractors with the
        // `axum::rejection` target, at `TRACE` level.
        // `axum::rejection=trace` enables showing those events
        Some(Command::Serve { .. }) => init_tracing(format!(
            "{}=debug,tower_http=debug,axum::rejection=trace",
            env!("CARGO_CRATE_NAME")
        )),
        Some(Command::Chat {}) | Some(Command::Query { .. }) => {
            init_tracing(format!("{}=warn", env!("CARGO_CRATE_NAME")))
        }
        _ => init_tracing(format!("{}=debug", env!("CARGO_CRATE_NAME"))),
    }

    let config = AppConfig::from_env()?;

    // Handle each sub command
    match args.command {
        Some(Command::Init { db }) => {
            init::run(db, &config.vec_db_path).await?;
        }
        Some(Command::Serve { host, port }) => {
            serve::run(host, port, config).await?;
        }
        Some(Command::Index {
            path,
            chunk_size,
            reset,
        }) => {
            index::run(&path, chunk_size, reset, &config.vec_db_path).await?;
        }
        Some(Command::Seed { seed, start, end }) => {
            seed::run(seed, start, end, &config.vec_db_path).await?;
        }
        Some(Command::Query { term, limit }) => {
            query::run(term, limit, &config.vec_db_path).await?;
        }
        Some(Command::Chat {}) => {
            chat::run(config).await?;
        }
        None => {}
    }

    Ok(())
}
