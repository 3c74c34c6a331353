//! Custom error types for the search service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the search service
#[derive(Error, Debug)]
pub enum SearchError {
    /// Bad input, the client's fault
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid session cookie, or a bad crawler key
    #[error("Not authenticated")]
    Unauthorized,

    /// A required secret is missing from the environment
    #[error("Service misconfigured")]
    Configuration(&'static str),

    /// Storage failure; the raw error is logged, never sent to the client
    #[error("Search is temporarily unavailable")]
    Storage,
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            SearchError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            SearchError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            SearchError::Configuration(what) => {
                tracing::error!("Search service misconfigured: {} is not set", what);
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
            SearchError::Storage => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
