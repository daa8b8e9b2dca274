//! Ordered fallback across candidate models.
//!
//! Candidates are tried one at a time in priority order. Each call is
//! wrapped in the retry policy and the first success wins. When every
//! candidate fails only the last error is returned; earlier ones are
//! logged.

use super::error::AnswerError;
use super::retry::RetryPolicy;
use crate::gemini::{GenerationClient, GenerationRequest};

pub const DEFAULT_MODEL_CANDIDATES: [&str; 3] =
    ["gemini-1.5-flash", "gemini-2.5-flash", "gemini-2.5-pro"];

#[derive(Clone, Debug)]
pub struct ModelInvoker {
    candidates: Vec<String>,
    policy: RetryPolicy,
}

impl Default for ModelInvoker {
    fn default() -> Self {
        Self::new(
            DEFAULT_MODEL_CANDIDATES.iter().map(|m| m.to_string()).collect(),
            RetryPolicy::default(),
        )
    }
}

impl ModelInvoker {
    pub fn new(candidates: Vec<String>, policy: RetryPolicy) -> Self {
        Self { candidates, policy }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn invoke(
        &self,
        client: &dyn GenerationClient,
        prompt: &str,
        api_key: &str,
    ) -> Result<String, AnswerError> {
        let mut last_err = None;

        for (index, model) in self.candidates.iter().enumerate() {
            let request = GenerationRequest::new(model, prompt, api_key);
            let result = self
                .policy
                .run(model, |_attempt| client.generate_content(&request))
                .await;

            match result {
                Ok(text) => {
                    tracing::info!("Model {} answered (candidate {})", model, index + 1);
                    return Ok(text);
                }
                Err(err) => {
                    tracing::warn!(
                        "Candidate {}/{} ({}) failed: {}",
                        index + 1,
                        self.candidates.len(),
                        model,
                        err
                    );
                    last_err = Some(err);
                }
            }
        }

        match last_err {
            Some(err) => Err(AnswerError::AllModelsExhausted(Box::new(err))),
            None => Err(AnswerError::Configuration(String::from(
                "No candidate models configured",
            ))),
        }
    }
}
