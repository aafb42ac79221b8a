//! UV index lookup.
//!
//! The engine needs a UV index for every outdoor evaluation but has no way to
//! recover from a missing one, so lookups go through [`resolve_uv_index`],
//! which turns any failure into [`UvReading::Fallback`] before the value
//! reaches the combiner.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::error::UvLookupError;
use crate::types::{Coordinates, DEFAULT_UV_INDEX};

const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// A source of UV index readings for a location
#[async_trait]
pub trait UvLookup: Send + Sync {
    async fn lookup_uv_index(&self, coordinates: Coordinates) -> Result<f64, UvLookupError>;
}

/// Outcome of resolving the UV index for an evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UvReading {
    Measured(f64),
    /// Lookup failed; the moderate default applies
    Fallback,
}

impl UvReading {
    pub fn value(&self) -> f64 {
        match self {
            Self::Measured(v) => *v,
            Self::Fallback => DEFAULT_UV_INDEX,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback)
    }
}

fn validate_index(value: f64) -> Result<f64, UvLookupError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(UvLookupError::InvalidValue(value))
    }
}

/// Look up the UV index, substituting the default on any failure.
pub async fn resolve_uv_index<L>(lookup: &L, coordinates: Coordinates) -> UvReading
where
    L: UvLookup + ?Sized,
{
    match lookup
        .lookup_uv_index(coordinates)
        .await
        .and_then(validate_index)
    {
        Ok(value) => {
            tracing::debug!("UV index at {}, {}: {}", coordinates.lat, coordinates.lon, value);
            UvReading::Measured(value)
        }
        Err(e) => {
            tracing::warn!(
                "UV lookup failed at {}, {} ({}); using default {}",
                coordinates.lat,
                coordinates.lon,
                e,
                DEFAULT_UV_INDEX
            );
            UvReading::Fallback
        }
    }
}

/// Returns the same index for every location
#[derive(Debug, Clone, Copy)]
pub struct FixedUvIndex(pub f64);

#[async_trait]
impl UvLookup for FixedUvIndex {
    async fn lookup_uv_index(&self, _coordinates: Coordinates) -> Result<f64, UvLookupError> {
        Ok(self.0)
    }
}

#[derive(Debug, Deserialize)]
struct UvIndexResponse {
    value: f64,
}

/// UV index over HTTP: `GET {base_url}/uvi?lat=..&lon=..&appid=..`,
/// reading the `value` field of the JSON response.
#[derive(Debug, Clone)]
pub struct HttpUvLookup {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpUvLookup {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, UvLookupError> {
        Self::with_timeout(base_url, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, UvLookupError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl UvLookup for HttpUvLookup {
    #[instrument(skip(self), level = "debug")]
    async fn lookup_uv_index(&self, coordinates: Coordinates) -> Result<f64, UvLookupError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| UvLookupError::Unavailable("no API key configured".to_string()))?;

        let url = format!("{}/uvi", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coordinates.lat.to_string()),
                ("lon", coordinates.lon.to_string()),
                ("appid", api_key.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UvLookupError::Status(status.as_u16()));
        }

        let body: UvIndexResponse = response.json().await?;
        Ok(body.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    #[async_trait]
    impl UvLookup for Failing {
        async fn lookup_uv_index(&self, _c: Coordinates) -> Result<f64, UvLookupError> {
            Err(UvLookupError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn test_reading_values() {
        assert_eq!(UvReading::Measured(7.5).value(), 7.5);
        assert_eq!(UvReading::Fallback.value(), DEFAULT_UV_INDEX);
        assert!(UvReading::Fallback.is_fallback());
        assert!(!UvReading::Measured(0.0).is_fallback());
    }

    #[tokio::test]
    async fn test_fixed_source_resolves_measured() {
        let reading = resolve_uv_index(&FixedUvIndex(6.2), Coordinates::default()).await;
        assert_eq!(reading, UvReading::Measured(6.2));
    }

    #[tokio::test]
    async fn test_failure_falls_back() {
        let reading = resolve_uv_index(&Failing, Coordinates::default()).await;
        assert_eq!(reading, UvReading::Fallback);
        assert_eq!(reading.value(), 3.0);
    }

    #[tokio::test]
    async fn test_invalid_values_fall_back() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let reading = resolve_uv_index(&FixedUvIndex(bad), Coordinates::default()).await;
            assert_eq!(reading, UvReading::Fallback);
        }
    }

    #[tokio::test]
    async fn test_http_lookup_without_key_is_unavailable() {
        let lookup = HttpUvLookup::new("http://127.0.0.1:9", None).unwrap();
        let err = lookup
            .lookup_uv_index(Coordinates { lat: 1.0, lon: 2.0 })
            .await
            .unwrap_err();
        assert!(matches!(err, UvLookupError::Unavailable(_)));
    }
}
