use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::ai::error::AnswerError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// A single generation attempt against one model
#[derive(Clone, Debug)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub api_key: String,
}

impl GenerationRequest {
    pub fn new(model: &str, prompt: &str, api_key: &str) -> Self {
        Self {
            model: model.to_string(),
            prompt: prompt.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

/// Anything that can turn a prompt into text with a named model.
///
/// Implementations make exactly one remote call per invocation and
/// leave retries to the caller.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate_content(&self, request: &GenerationRequest) -> Result<String, AnswerError>;
}

// {
//   "candidates": [
//     {"content": {"parts": [{"text": "..."}], "role": "model"}, "finishReason": "STOP"}
//   ],
//   "usageMetadata": {...}
// }
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

#[derive(Debug, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Part {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// All generated text across every candidate and part, in order.
    /// No candidates means an empty answer rather than an error.
    pub fn text(&self) -> String {
        self.candidates
            .iter()
            .flat_map(|c| c.content.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct GeminiClient {
    base_url: String,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self, model: &str) -> String {
        format!("{}/{}:generateContent", self.base_url, model)
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn send_error(model: &str, err: reqwest::Error) -> AnswerError {
    if err.is_timeout() || err.is_connect() {
        AnswerError::TransientModel {
            model: model.to_string(),
            reason: err.to_string(),
        }
    } else {
        AnswerError::Model {
            model: model.to_string(),
            status: None,
            message: format!("Unexpected error calling model: {}", err),
        }
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate_content(&self, request: &GenerationRequest) -> Result<String, AnswerError> {
        let model = request.model.as_str();
        let payload = json!({
            "contents": [{"parts": [{"text": request.prompt}]}]
        });

        tracing::debug!("Requesting generation from {}", model);

        let response = self
            .http
            .post(self.url(model))
            .query(&[("key", request.api_key.as_str())])
            .header("Content-Type", "application/json")
            // Backstop only. The retry policy enforces the real limit.
            .timeout(Duration::from_secs(60 * 5))
            .json(&payload)
            .send()
            .await
            .map_err(|e| send_error(model, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnswerError::Model {
                model: model.to_string(),
                status: Some(status.as_u16()),
                message: format!("{} {}", status.as_u16(), body),
            });
        }

        let body: GenerateContentResponse =
            response.json().await.map_err(|e| AnswerError::Model {
                model: model.to_string(),
                status: None,
                message: format!("Invalid response body: {}", e),
            })?;

        Ok(body.text())
    }
}
