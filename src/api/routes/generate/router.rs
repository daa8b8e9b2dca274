//! Router for the generate API

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::{Json, Router, extract::State, routing::post};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

/// Answer the latest user message in the conversation
async fn generate(
    State(state): State<SharedState>,
    payload: Result<Json<public::GenerateRequest>, JsonRejection>,
) -> Result<Json<public::GenerateResponse>, ApiError> {
    // Report bad bodies with the same `{"detail"}` shape as other errors
    let Json(payload) = payload?;
    let answer = state.answers.answer(&payload.messages).await?;
    Ok(Json(answer.into()))
}

/// Create the generate router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(generate))
}
