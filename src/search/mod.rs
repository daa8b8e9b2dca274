//! Similarity search over indexed passages

pub mod embed;
pub mod indexing;
pub mod vector;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use embed::{EMBEDDING_DIMENSIONS, Embedder, FastEmbedder};
pub use indexing::{DEFAULT_CHUNK_SIZE, Document, index_directory, index_documents};
pub use vector::VectorIndex;

/// A passage returned by a similarity search
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RetrievedPassage {
    pub content: String,
    pub id: Option<String>,
    /// Distance from the query, lower is more relevant
    pub score: f64,
}

#[async_trait]
pub trait SimilarityIndex: Send + Sync {
    /// Return up to `k` passages ordered from most to least relevant
    async fn search(&self, query: &str, k: usize) -> Result<Vec<RetrievedPassage>>;
}
