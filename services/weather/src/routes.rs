//! Weather service routes

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use crate::{AppState, error::WeatherError, models::WeatherParams};

/// Create the router for the weather service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/weather", get(weather))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "weather-service"
    }))
}

/// Weather endpoint. Served from the cache when fresh; coordinates default
/// to the configured location.
pub async fn weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherParams>,
) -> Result<impl IntoResponse, WeatherError> {
    let lat = params.lat.unwrap_or(state.config.default_lat);
    let lon = params.lon.unwrap_or(state.config.default_lon);

    let snapshot = state.weather_service.get_weather(lat, lon).await?;

    Ok(Json(snapshot))
}
