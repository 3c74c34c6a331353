//! Upstream weather provider
//!
//! The provider trait keeps the upstream behind a seam so the read-through
//! service can be exercised against a fake in tests. The real client talks
//! to the OpenWeatherMap current-conditions and 5-day forecast endpoints.

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, warn};

use crate::error::WeatherError;
use crate::models::{CurrentConditions, ForecastEntry};

/// Per-request upstream timeout. The upstream is rate limited and
/// occasionally slow; a worker must never wait longer than this.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Source of weather data
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch_current(&self, lat: f64, lon: f64) -> Result<CurrentConditions, WeatherError>;

    async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastEntry>, WeatherError>;
}

/// OpenWeatherMap client
pub struct OpenWeatherClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    /// Create a new upstream client
    pub fn new(api_key: String) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .map_err(|e| {
                error!("Failed to build upstream HTTP client: {}", e);
                WeatherError::Upstream
            })?;

        Ok(Self {
            http,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        lat: f64,
        lon: f64,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("units", "metric".to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| {
                error!("Upstream {} request failed: {}", endpoint, e);
                WeatherError::Upstream
            })?;

        if !response.status().is_success() {
            warn!("Upstream {} returned status {}", endpoint, response.status());
            return Err(WeatherError::Upstream);
        }

        response.json().await.map_err(|e| {
            error!("Upstream {} returned malformed body: {}", endpoint, e);
            WeatherError::Upstream
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch_current(&self, lat: f64, lon: f64) -> Result<CurrentConditions, WeatherError> {
        let body: CurrentResponse = self.get_json("weather", lat, lon).await?;

        let condition = body.weather.into_iter().next().unwrap_or_default();

        Ok(CurrentConditions {
            location: body.name,
            temperature: body.main.temp,
            feels_like: body.main.feels_like,
            humidity: body.main.humidity,
            description: condition.description,
            icon: condition.icon,
        })
    }

    async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastEntry>, WeatherError> {
        let body: ForecastResponse = self.get_json("forecast", lat, lon).await?;

        let entries = body
            .list
            .into_iter()
            .filter_map(|item| {
                let timestamp = DateTime::from_timestamp(item.dt, 0)?;
                let condition = item.weather.into_iter().next().unwrap_or_default();
                Some(ForecastEntry {
                    timestamp,
                    temperature: item.main.temp,
                    description: condition.description,
                    icon: condition.icon,
                })
            })
            .collect();

        Ok(entries)
    }
}

// Wire shapes of the two upstream endpoints; only the fields the snapshot
// needs are deserialized.

#[derive(Deserialize)]
struct CurrentResponse {
    name: String,
    main: CurrentMain,
    #[serde(default)]
    weather: Vec<ConditionField>,
}

#[derive(Deserialize)]
struct CurrentMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Deserialize, Default)]
struct ConditionField {
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastItem>,
}

#[derive(Deserialize)]
struct ForecastItem {
    dt: i64,
    main: ForecastMain,
    #[serde(default)]
    weather: Vec<ConditionField>,
}

#[derive(Deserialize)]
struct ForecastMain {
    temp: f64,
}
