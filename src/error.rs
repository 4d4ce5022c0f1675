use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use thiserror::Error;

use crate::{generator::GeneratorError, models::{GenerationResult, ValidationError}};

pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate description. Please try again.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Errors that end a request at the handler boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The cause is kept for logging only; clients see [`GENERATION_FAILED_MESSAGE`].
    #[error("generation failed: {0}")]
    Generation(#[from] GeneratorError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn client_message(&self) -> String {
        match self {
            ApiError::Validation(e) => e.to_string(),
            ApiError::Generation(_) => GENERATION_FAILED_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(GenerationResult::failure(self.client_message()))).into_response()
    }
}

pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(GenerationResult::failure(INTERNAL_ERROR_MESSAGE)),
    )
        .into_response()
}
