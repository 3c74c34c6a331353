//! Single-slot, time-bounded cache for the weather snapshot
//!
//! The slot is the only in-process shared mutable state in the service.
//! Reads take the shared guard; the overwrite takes the exclusive guard.
//! Callers fetch from the upstream outside any guard, so concurrent misses
//! may each fetch and the last writer wins.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::models::WeatherSnapshot;

struct CachedSnapshot {
    snapshot: WeatherSnapshot,
    expires_at: DateTime<Utc>,
}

/// Read-through cache slot with a fixed time bound.
pub struct WeatherCache {
    slot: RwLock<Option<CachedSnapshot>>,
    ttl: Duration,
}

impl WeatherCache {
    /// Create an empty cache with the given time bound.
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    /// Return the cached snapshot when it is still fresh and covers the
    /// requested coordinates.
    pub async fn get(&self, lat: f64, lon: f64, now: DateTime<Utc>) -> Option<WeatherSnapshot> {
        let guard = self.slot.read().await;

        guard
            .as_ref()
            .filter(|cached| {
                now < cached.expires_at
                    && cached.snapshot.latitude == lat
                    && cached.snapshot.longitude == lon
            })
            .map(|cached| cached.snapshot.clone())
    }

    /// Overwrite the slot whole. A failed refresh never reaches this
    /// point, so the previous entry stays untouched until a successful one.
    pub async fn store(&self, snapshot: WeatherSnapshot, now: DateTime<Utc>) {
        let mut guard = self.slot.write().await;
        *guard = Some(CachedSnapshot {
            snapshot,
            expires_at: now + self.ttl,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CurrentConditions;

    fn snapshot(lat: f64, lon: f64, fetched_at: DateTime<Utc>) -> WeatherSnapshot {
        WeatherSnapshot {
            latitude: lat,
            longitude: lon,
            current: CurrentConditions {
                location: "Copenhagen".to_string(),
                temperature: 8.0,
                feels_like: 6.5,
                humidity: 70,
                description: "scattered clouds".to_string(),
                icon: "03d".to_string(),
            },
            forecast: Vec::new(),
            fetched_at,
        }
    }

    #[tokio::test]
    async fn hit_within_ttl_miss_after() {
        let cache = WeatherCache::new(Duration::minutes(15));
        let now = Utc::now();

        cache.store(snapshot(55.0, 12.0, now), now).await;

        assert!(cache.get(55.0, 12.0, now + Duration::minutes(14)).await.is_some());
        assert!(cache.get(55.0, 12.0, now + Duration::minutes(15)).await.is_none());
    }

    #[tokio::test]
    async fn different_coordinates_miss() {
        let cache = WeatherCache::new(Duration::minutes(15));
        let now = Utc::now();

        cache.store(snapshot(55.0, 12.0, now), now).await;

        assert!(cache.get(56.0, 12.0, now).await.is_none());
    }

    #[tokio::test]
    async fn empty_cache_misses() {
        let cache = WeatherCache::new(Duration::minutes(15));
        assert!(cache.get(55.0, 12.0, Utc::now()).await.is_none());
    }
}
