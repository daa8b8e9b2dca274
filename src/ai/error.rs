//! Failures that can occur while answering a conversation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnswerError {
    /// The conversation contained no `user` message
    #[error("No user message provided.")]
    InvalidRequest,

    /// A required setting such as the API key is missing
    #[error("{0}")]
    Configuration(String),

    /// The model was busy, timed out, or unreachable
    #[error("Model {model} busy or timed out: {reason}")]
    TransientModel { model: String, reason: String },

    /// The model rejected the request or returned something unusable
    #[error("Model {model} error: {message}")]
    Model {
        model: String,
        status: Option<u16>,
        message: String,
    },

    /// Every candidate failed. Holds the last candidate's error.
    #[error("All candidate models failed. Last error: {0}")]
    AllModelsExhausted(Box<AnswerError>),

    #[error(transparent)]
    Retrieval(anyhow::Error),

    #[error("Failed to render prompt: {0}")]
    Prompt(#[from] handlebars::RenderError),
}

impl AnswerError {
    /// The error that ultimately caused this one, unwrapping
    /// `AllModelsExhausted`.
    pub fn last_cause(&self) -> &AnswerError {
        match self {
            AnswerError::AllModelsExhausted(inner) => inner.last_cause(),
            other => other,
        }
    }

    /// The remote HTTP status attached to a model failure, if any
    pub fn status(&self) -> Option<u16> {
        match self.last_cause() {
            AnswerError::Model { status, .. } => *status,
            _ => None,
        }
    }
}
