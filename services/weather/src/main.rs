use anyhow::Result;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

mod cache;
mod config;
mod error;
mod forecast;
mod models;
mod provider;
mod routes;
mod service;

use std::sync::Arc;

use crate::{
    config::WeatherConfig,
    provider::{OpenWeatherClient, WeatherProvider},
    service::WeatherService,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub weather_service: Arc<WeatherService>,
    pub config: WeatherConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_max_level(Level::INFO)
        .init();

    info!("Starting weather service");

    let config = WeatherConfig::from_env();

    let provider: Option<Arc<dyn WeatherProvider>> = match &config.api_key {
        Some(key) => Some(Arc::new(OpenWeatherClient::new(key.clone())?)),
        None => {
            warn!("WEATHER_API_KEY not set; weather lookups will fail until it is configured");
            None
        }
    };

    let weather_service = Arc::new(WeatherService::new(provider));

    let app_state = AppState {
        weather_service,
        config: config.clone(),
    };

    info!("Weather service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Weather service listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
