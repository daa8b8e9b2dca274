//! Answer the latest user question in a conversation using retrieved
//! context and the model fallback chain.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::AnswerError;
use super::invoker::ModelInvoker;
use super::prompt;
use crate::gemini::GenerationClient;
use crate::search::{RetrievedPassage, SimilarityIndex};

pub const GREETINGS: [&str; 3] = ["hello", "hi", "hey"];
pub const GREETING_REPLY: &str = "Hello there! How can I assist you with your travel plans today?";
pub const DEFAULT_TOP_K: usize = 5;
pub const API_KEY_ENV_VAR: &str = "GENAI_API_KEY";

pub const USER_ROLE: &str = "user";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn new(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self::new(USER_ROLE, content)
    }

    pub fn is_user(&self) -> bool {
        self.role == USER_ROLE
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub message: String,
    /// One entry per passage used as context, in retrieval order
    pub sources: Vec<Option<String>>,
}

impl Answer {
    pub fn greeting() -> Self {
        Self {
            message: GREETING_REPLY.to_string(),
            sources: vec![],
        }
    }

    pub fn from_passages(message: String, passages: &[RetrievedPassage]) -> Self {
        Self {
            message,
            sources: passages.iter().map(|p| p.id.clone()).collect(),
        }
    }
}

/// The trimmed text of the last user message
pub fn active_question(messages: &[Message]) -> Result<String, AnswerError> {
    messages
        .iter()
        .rev()
        .find(|m| m.is_user())
        .map(|m| m.content.trim().to_string())
        .ok_or(AnswerError::InvalidRequest)
}

pub fn is_greeting(question: &str) -> bool {
    let lower = question.to_lowercase();
    GREETINGS.contains(&lower.as_str())
}

pub struct AnswerService {
    index: Arc<dyn SimilarityIndex>,
    client: Arc<dyn GenerationClient>,
    invoker: ModelInvoker,
    api_key: Option<String>,
    top_k: usize,
}

impl AnswerService {
    pub fn new(
        index: Arc<dyn SimilarityIndex>,
        client: Arc<dyn GenerationClient>,
        invoker: ModelInvoker,
        api_key: Option<String>,
    ) -> Self {
        Self {
            index,
            client,
            invoker,
            api_key,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub async fn answer(&self, messages: &[Message]) -> Result<Answer, AnswerError> {
        let question = active_question(messages)?;

        if is_greeting(&question) {
            tracing::debug!("Answering greeting without retrieval");
            return Ok(Answer::greeting());
        }

        let passages = self
            .index
            .search(&question, self.top_k)
            .await
            .map_err(AnswerError::Retrieval)?;
        tracing::debug!("Retrieved {} passages", passages.len());

        let context = prompt::build_context(&passages);
        let prompt = prompt::answer_prompt(&context, &question)?;

        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AnswerError::Configuration(format!("{} not set in environment", API_KEY_ENV_VAR))
        })?;

        let message = self
            .invoker
            .invoke(self.client.as_ref(), &prompt, api_key)
            .await?;

        Ok(Answer::from_passages(message, &passages))
    }
}
