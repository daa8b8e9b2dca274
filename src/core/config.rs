use std::env;

use anyhow::{Result, anyhow};
use http::HeaderValue;

use crate::ai::answer::{API_KEY_ENV_VAR, DEFAULT_TOP_K};
use crate::ai::invoker::DEFAULT_MODEL_CANDIDATES;
use crate::ai::retry::RetryPolicy;
use crate::gemini::DEFAULT_BASE_URL;

pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage_path: String,
    pub vec_db_path: String,
    /// Missing keys only fail requests that need a model
    pub genai_api_key: Option<String>,
    pub genai_base_url: String,
    pub model_candidates: Vec<String>,
    pub allowed_origin: HeaderValue,
    pub top_k: usize,
    pub retry_policy: RetryPolicy,
}

/// Split a comma separated list of model names, dropping blanks
pub fn parse_models(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|m| m.trim())
        .filter(|m| !m.is_empty())
        .map(|m| m.to_string())
        .collect()
}

impl AppConfig {
    /// Read configuration from the process environment. Call
    /// `dotenvy::dotenv()` first to pick up a local `.env` file.
    pub fn from_env() -> Result<Self> {
        let storage_path = env::var("CONCIERGE_STORAGE_PATH").unwrap_or("./".to_string());
        let vec_db_path = format!("{}/db", storage_path.trim_end_matches('/'));
        let genai_api_key = env::var(API_KEY_ENV_VAR).ok().filter(|k| !k.is_empty());
        let genai_base_url =
            env::var("CONCIERGE_GENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model_candidates = match env::var("CONCIERGE_MODELS") {
            Ok(raw) => parse_models(&raw),
            Err(_) => DEFAULT_MODEL_CANDIDATES
                .iter()
                .map(|m| m.to_string())
                .collect(),
        };
        let allowed_origin = env::var("CONCIERGE_ALLOWED_ORIGIN")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_string());
        let allowed_origin = HeaderValue::from_str(&allowed_origin)
            .map_err(|e| anyhow!("Invalid CONCIERGE_ALLOWED_ORIGIN {}: {}", allowed_origin, e))?;
        let top_k = match env::var("CONCIERGE_TOP_K") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| anyhow!("Invalid CONCIERGE_TOP_K {}: {}", raw, e))?,
            Err(_) => DEFAULT_TOP_K,
        };

        if genai_api_key.is_none() {
            tracing::warn!(
                "{} is not set, only greetings can be answered",
                API_KEY_ENV_VAR
            );
        }

        Ok(Self {
            storage_path,
            vec_db_path,
            genai_api_key,
            genai_base_url,
            model_candidates,
            allowed_origin,
            top_k,
            retry_policy: RetryPolicy::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_models() {
        assert_eq!(
            parse_models("gemini-1.5-flash, gemini-2.5-pro,,"),
            vec!["gemini-1.5-flash", "gemini-2.5-pro"]
        );
        assert!(parse_models(" , ").is_empty());
    }
}
