//! Chunk documents and write them to the vector index

use std::fs;
use std::path::Path;

use anyhow::Result;
use text_splitter::TextSplitter;

use super::VectorIndex;

pub const DEFAULT_CHUNK_SIZE: usize = 1000;

const INDEXABLE_EXTENSIONS: [&str; 2] = ["txt", "md"];

/// Text to index. Each chunk is stored with the id `{name}:{chunk}`.
#[derive(Clone, Debug)]
pub struct Document {
    pub name: String,
    pub body: String,
}

impl Document {
    pub fn new(name: &str, body: &str) -> Self {
        Self {
            name: name.to_string(),
            body: body.to_string(),
        }
    }

    pub fn chunks(&self, chunk_size: usize) -> Vec<(Option<String>, String)> {
        let splitter = TextSplitter::new(chunk_size.max(1));
        splitter
            .chunks(&self.body)
            .enumerate()
            .map(|(i, chunk)| (Some(format!("{}:{}", self.name, i)), chunk.to_string()))
            .collect()
    }
}

pub async fn index_documents(
    index: &VectorIndex,
    documents: &[Document],
    chunk_size: usize,
) -> Result<usize> {
    let passages: Vec<(Option<String>, String)> = documents
        .iter()
        .flat_map(|d| d.chunks(chunk_size))
        .collect();
    index.insert(passages).await
}

/// Read every text or markdown file directly inside `dir`
pub fn read_documents(dir: &Path) -> Result<Vec<Document>> {
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| INDEXABLE_EXTENSIONS.contains(&ext))
        })
        .collect();
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let body = fs::read_to_string(&path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        documents.push(Document { name, body });
    }
    Ok(documents)
}

pub async fn index_directory(index: &VectorIndex, dir: &Path, chunk_size: usize) -> Result<usize> {
    let documents = read_documents(dir)?;
    tracing::info!("Indexing {} documents from {}", documents.len(), dir.display());
    index_documents(index, &documents, chunk_size).await
}
