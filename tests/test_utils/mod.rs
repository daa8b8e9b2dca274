//! Test utilities for integration tests
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use axum::{Router, body::Body};
use http::HeaderValue;

use concierge::ai::RetryPolicy;
use concierge::api::AppState;
use concierge::api::app;
use concierge::core::AppConfig;
use concierge::gemini::GeminiClient;
use concierge::search::{RetrievedPassage, SimilarityIndex};

pub const TEST_ORIGIN: &str = "http://localhost:3000";

/// Index that always returns the same passages and counts searches
pub struct StaticIndex {
    pub passages: Vec<RetrievedPassage>,
    pub searches: AtomicUsize,
}

impl StaticIndex {
    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SimilarityIndex for StaticIndex {
    async fn search(&self, _query: &str, k: usize) -> Result<Vec<RetrievedPassage>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        Ok(self.passages.iter().take(k).cloned().collect())
    }
}

pub fn test_passages() -> Vec<RetrievedPassage> {
    vec![
        RetrievedPassage {
            content: String::from("Flight AF123 from Paris to Rome departs 2025-07-04."),
            id: Some(String::from("flights.md:0")),
            score: 0.12,
        },
        RetrievedPassage {
            content: String::from("Hotel Roma Grand has standard rooms available."),
            id: None,
            score: 0.34,
        },
    ]
}

/// Creates a test application router that sends generation requests
/// to `genai_base_url`, usually a `mockito` server.
///
/// Tests that use a shared mock server should be marked `#[serial]`.
pub fn test_app(
    genai_base_url: &str,
    api_key: Option<&str>,
    models: &[&str],
) -> (Router, Arc<StaticIndex>) {
    // Nothing is written to disk, the index is in memory
    let storage_path = std::env::temp_dir().display().to_string();

    let config = AppConfig {
        vec_db_path: format!("{}/db", storage_path),
        storage_path,
        genai_api_key: api_key.map(|k| k.to_string()),
        genai_base_url: genai_base_url.to_string(),
        model_candidates: models.iter().map(|m| m.to_string()).collect(),
        allowed_origin: HeaderValue::from_static(TEST_ORIGIN),
        top_k: 5,
        retry_policy: RetryPolicy::new(3, Duration::from_millis(1), Duration::from_secs(5)),
    };

    let index = Arc::new(StaticIndex {
        passages: test_passages(),
        searches: AtomicUsize::new(0),
    });
    let client = Arc::new(GeminiClient::new(genai_base_url));
    let state = AppState::new(config, index.clone(), client);

    (app(Arc::new(state)), index)
}

pub fn gemini_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [
            {"content": {"parts": [{"text": text}], "role": "model"}}
        ]
    })
    .to_string()
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
