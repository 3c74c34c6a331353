//! Weather service models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions reported by the upstream provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub description: String,
    pub icon: String,
}

/// One raw forecast entry as delivered by the upstream (one per 3-hour
/// step), before day grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub description: String,
    pub icon: String,
}

/// One aggregated forecast day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temp_min: f64,
    pub temp_max: f64,
    pub description: String,
    pub icon: String,
}

/// The cached weather response: overwritten whole on refresh, never
/// partially updated.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherSnapshot {
    pub latitude: f64,
    pub longitude: f64,
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
    pub fetched_at: DateTime<Utc>,
}

/// Query parameters accepted by the weather endpoint
#[derive(Debug, Deserialize)]
pub struct WeatherParams {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}
