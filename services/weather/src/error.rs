//! Custom error types for the weather service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the weather service
#[derive(Error, Debug, PartialEq, Eq)]
pub enum WeatherError {
    /// The upstream API key is not configured
    #[error("Weather is not configured")]
    Configuration,

    /// The upstream call failed or returned a non-success status; detail
    /// is logged where it happened, never sent to the client
    #[error("Weather is temporarily unavailable")]
    Upstream,
}

impl IntoResponse for WeatherError {
    fn into_response(self) -> Response {
        let status = match self {
            WeatherError::Configuration => StatusCode::SERVICE_UNAVAILABLE,
            WeatherError::Upstream => StatusCode::BAD_GATEWAY,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
