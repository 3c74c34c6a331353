//! Custom error types for the auth service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for authentication operations
#[derive(Error, Debug)]
pub enum AuthError {
    /// Bad input, the client's fault
    #[error("{0}")]
    Validation(String),

    /// Bad credentials. The message never distinguishes an unknown user
    /// from a wrong password.
    #[error("Invalid username or password")]
    Authentication,

    /// Uniqueness violation on registration
    #[error("{0} is already taken")]
    Conflict(&'static str),

    /// No session token supplied, or the token does not resolve
    #[error("Not authenticated")]
    SessionNotFound,

    /// The session row exists but is past its expiry
    #[error("Session expired")]
    SessionExpired,

    /// Storage failure; internal detail is logged, never sent to the client
    #[error("Storage error")]
    Storage(anyhow::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AuthError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AuthError::Authentication => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            AuthError::Conflict(_) => (StatusCode::CONFLICT, self.to_string()),
            AuthError::SessionNotFound | AuthError::SessionExpired => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            AuthError::Storage(e) => {
                tracing::error!("Auth storage failure: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_message_is_uniform() {
        // Whatever triggered the failure, the client sees one message.
        assert_eq!(AuthError::Authentication.to_string(), "Invalid username or password");
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            AuthError::Validation("bad".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Authentication.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Conflict("username").into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AuthError::SessionExpired.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
