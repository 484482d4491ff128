//! Error types for the stand-in backend.
//!
//! [`StubError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Every
//! error reply is JSON: `{"error": <message>, "status": <code>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur while handling an editor request.
#[derive(Debug, thiserror::Error)]
pub enum StubError {
    /// The request named an entity the content catalog does not have.
    #[error("not found: {0}")]
    NotFound(String),

    /// A required field was missing or not convertible.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StubError {
    /// HTTP status this error is reported with.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for StubError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::NotFound(msg) | Self::BadRequest(msg) => msg.clone(),
            Self::Serialization(e) => format!("JSON error: {e}"),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
