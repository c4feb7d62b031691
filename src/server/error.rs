use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use crate::COMPONENT;
use crate::db::errors::DatabaseError;
use crate::validation::ValidationError;

// API ERRORS
// ================================================================================================

/// An error surfaced at the request-handler boundary.
///
/// Every variant maps to exactly one HTTP response; nothing propagates past the handler.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Authentication required. Provide a Basic authorization header")]
    MissingCredentials,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Transaction store unavailable. Please retry later")]
    Database(#[from] DatabaseError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingCredentials | ApiError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            },
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The JSON envelope returned for every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    status: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Database details stay in the log; the client only sees the generic message.
        if let ApiError::Database(source) = &self {
            error!(target: COMPONENT, %source, "transaction store failure");
        }

        let status = self.status_code();
        let body = ErrorBody { status: status.as_u16(), message: self.to_string() };
        (status, Json(body)).into_response()
    }
}
