//! Public API types

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::json;

use crate::ai::AnswerError;

// Errors

pub struct ApiError(anyhow::Error);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        if let Some(rejection) = self.0.downcast_ref::<JsonRejection>() {
            return rejection.status();
        }
        match self.0.downcast_ref::<AnswerError>() {
            Some(AnswerError::InvalidRequest) => StatusCode::BAD_REQUEST,
            Some(AnswerError::Configuration(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Some(
                AnswerError::AllModelsExhausted(_)
                | AnswerError::TransientModel { .. }
                | AnswerError::Model { .. },
            ) => StatusCode::SERVICE_UNAVAILABLE,
            Some(AnswerError::Retrieval(_) | AnswerError::Prompt(_)) | None => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Always log the error
        if status.is_server_error() {
            tracing::error!("{}", self.0);
        } else {
            tracing::debug!("Rejected request: {}", self.0);
        }

        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` or `Result<_, AnswerError>` to turn them into
/// `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// Re-export public types from each route

pub mod generate {
    pub use crate::api::routes::generate::public::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = vec![
            (AnswerError::InvalidRequest, StatusCode::BAD_REQUEST),
            (
                AnswerError::Configuration(String::from("GENAI_API_KEY not set")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AnswerError::AllModelsExhausted(Box::new(AnswerError::Model {
                    model: String::from("m"),
                    status: Some(400),
                    message: String::from("bad"),
                })),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AnswerError::Retrieval(anyhow::anyhow!("index down")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
        assert_eq!(
            ApiError::from(anyhow::anyhow!("other")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
