//! Read-through weather retrieval

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;

use crate::cache::WeatherCache;
use crate::error::WeatherError;
use crate::forecast::group_by_day;
use crate::models::WeatherSnapshot;
use crate::provider::WeatherProvider;

/// How long a fetched snapshot stays fresh, in minutes.
const CACHE_TTL_MINUTES: i64 = 15;

/// Weather service: a time-bounded cache in front of the upstream
/// provider. Constructed without a provider when no API key is
/// configured, in which case every cache miss fails.
pub struct WeatherService {
    provider: Option<Arc<dyn WeatherProvider>>,
    cache: WeatherCache,
}

impl WeatherService {
    /// Create a new weather service
    pub fn new(provider: Option<Arc<dyn WeatherProvider>>) -> Self {
        Self::with_ttl(provider, Duration::minutes(CACHE_TTL_MINUTES))
    }

    /// Create a weather service with an explicit cache time bound.
    pub fn with_ttl(provider: Option<Arc<dyn WeatherProvider>>, ttl: Duration) -> Self {
        Self {
            provider,
            cache: WeatherCache::new(ttl),
        }
    }

    /// Return the weather for the given coordinates, from the cache when
    /// fresh, otherwise refreshed from the upstream.
    ///
    /// The two upstream calls happen outside the cache lock; a failed
    /// refresh surfaces as an error and leaves the previous entry alone.
    pub async fn get_weather(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot, WeatherError> {
        if let Some(hit) = self.cache.get(lat, lon, Utc::now()).await {
            return Ok(hit);
        }

        let provider = self.provider.as_ref().ok_or(WeatherError::Configuration)?;

        let current = provider.fetch_current(lat, lon).await?;
        let entries = provider.fetch_forecast(lat, lon).await?;

        let fetched_at = Utc::now();
        let snapshot = WeatherSnapshot {
            latitude: lat,
            longitude: lon,
            current,
            forecast: group_by_day(&entries, fetched_at.date_naive()),
            fetched_at,
        };

        self.cache.store(snapshot.clone(), fetched_at).await;
        info!("Refreshed weather snapshot for ({}, {})", lat, lon);

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrentConditions, ForecastEntry};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts upstream calls and can be switched to fail.
    struct CountingProvider {
        current_calls: AtomicUsize,
        forecast_calls: AtomicUsize,
        fail: std::sync::atomic::AtomicBool,
    }

    impl CountingProvider {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                current_calls: AtomicUsize::new(0),
                forecast_calls: AtomicUsize::new(0),
                fail: std::sync::atomic::AtomicBool::new(false),
            })
        }
    }

    #[async_trait]
    impl WeatherProvider for CountingProvider {
        async fn fetch_current(
            &self,
            _lat: f64,
            _lon: f64,
        ) -> Result<CurrentConditions, WeatherError> {
            self.current_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(WeatherError::Upstream);
            }
            Ok(CurrentConditions {
                location: "Copenhagen".to_string(),
                temperature: 8.0,
                feels_like: 6.5,
                humidity: 70,
                description: "scattered clouds".to_string(),
                icon: "03d".to_string(),
            })
        }

        async fn fetch_forecast(
            &self,
            _lat: f64,
            _lon: f64,
        ) -> Result<Vec<ForecastEntry>, WeatherError> {
            self.forecast_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(WeatherError::Upstream);
            }
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn second_call_within_ttl_hits_the_cache() {
        let provider = CountingProvider::new();
        let service = WeatherService::new(Some(provider.clone()));

        let first = service.get_weather(55.0, 12.0).await.expect("first call succeeds");
        let second = service.get_weather(55.0, 12.0).await.expect("second call succeeds");

        assert_eq!(provider.current_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.forecast_calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.fetched_at, second.fetched_at);
    }

    #[tokio::test]
    async fn expired_entry_triggers_a_refresh() {
        let provider = CountingProvider::new();
        let service = WeatherService::with_ttl(Some(provider.clone()), Duration::zero());

        let first = service.get_weather(55.0, 12.0).await.expect("first call succeeds");
        let second = service.get_weather(55.0, 12.0).await.expect("second call succeeds");

        assert_eq!(provider.current_calls.load(Ordering::SeqCst), 2);
        assert!(second.fetched_at >= first.fetched_at);
    }

    #[tokio::test]
    async fn missing_api_key_fails_on_miss() {
        let service = WeatherService::new(None);

        let err = service
            .get_weather(55.0, 12.0)
            .await
            .expect_err("miss without a provider fails");
        assert_eq!(err, WeatherError::Configuration);
    }

    #[tokio::test]
    async fn failed_refresh_surfaces_upstream_error() {
        let provider = CountingProvider::new();
        let service = WeatherService::with_ttl(Some(provider.clone()), Duration::zero());

        service.get_weather(55.0, 12.0).await.expect("first call succeeds");

        provider.fail.store(true, Ordering::SeqCst);
        let err = service
            .get_weather(55.0, 12.0)
            .await
            .expect_err("refresh failure surfaces");
        assert_eq!(err, WeatherError::Upstream);

        // Once the upstream recovers the slot refreshes again.
        provider.fail.store(false, Ordering::SeqCst);
        assert!(service.get_weather(55.0, 12.0).await.is_ok());
    }
}
