//! HTTP error mapping.

use crate::task::services::TaskBoardError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::http::header::InvalidHeaderValue;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A task board operation failed.
    #[error(transparent)]
    Board(#[from] TaskBoardError),

    /// The request body or query was malformed.
    #[error("{0}")]
    BadRequest(&'static str),

    /// The request body is not JSON of the expected shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The path segment is not a task identifier.
    #[error("task not found: {0}")]
    MalformedTaskId(String),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Board(TaskBoardError::Domain(_))
            | Self::BadRequest(_)
            | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Board(TaskBoardError::NotFound(_)) | Self::MalformedTaskId(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Board(TaskBoardError::ColumnFull(_)) => StatusCode::CONFLICT,
            Self::Board(TaskBoardError::Persistence(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({ "success": false, "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

/// Errors raised while starting the HTTP server.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The listen address could not be bound.
    #[error("failed to bind listen address: {0}")]
    Bind(#[source] std::io::Error),

    /// The configured frontend origin is not a valid header value.
    #[error("invalid frontend origin '{origin}': {source}")]
    InvalidOrigin {
        /// Rejected origin.
        origin: String,
        /// Header parsing failure.
        source: InvalidHeaderValue,
    },

    /// The server loop terminated with an error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
