//! Public types for the generate API
use serde::{Deserialize, Serialize};

use crate::ai::{Answer, Message};

#[derive(Deserialize, Serialize)]
pub struct GenerateRequest {
    pub messages: Vec<Message>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct GenerateResponse {
    pub message: String,
    pub sources: Vec<Option<String>>,
}

impl From<Answer> for GenerateResponse {
    fn from(answer: Answer) -> Self {
        Self {
            message: answer.message,
            sources: answer.sources,
        }
    }
}
