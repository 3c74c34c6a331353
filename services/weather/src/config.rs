//! Weather service configuration

/// Default coordinates (Copenhagen).
const DEFAULT_LAT: f64 = 55.6761;
const DEFAULT_LON: f64 = 12.5683;

/// Weather service configuration
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: String,
    /// Upstream API key; cache misses fail while it is unset
    pub api_key: Option<String>,
    /// Coordinates used when the request does not supply any
    pub default_lat: f64,
    pub default_lon: f64,
}

impl WeatherConfig {
    /// Create a new WeatherConfig from environment variables
    ///
    /// # Environment Variables
    /// - `WEATHER_BIND_ADDR`: listener address (default: "0.0.0.0:3002")
    /// - `WEATHER_API_KEY`: upstream API key
    /// - `WEATHER_DEFAULT_LAT` / `WEATHER_DEFAULT_LON`: default coordinates
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("WEATHER_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3002".to_string());

        let api_key = std::env::var("WEATHER_API_KEY").ok().filter(|k| !k.is_empty());

        let default_lat = env_f64("WEATHER_DEFAULT_LAT", DEFAULT_LAT);
        let default_lon = env_f64("WEATHER_DEFAULT_LON", DEFAULT_LON);

        Self {
            bind_addr,
            api_key,
            default_lat,
            default_lon,
        }
    }
}

fn env_f64(name: &str, default: f64) -> f64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
