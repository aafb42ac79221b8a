//! Reading current-weather payloads into [`WeatherObservation`]s.
//!
//! The accepted shape is the common "current weather" JSON document:
//!
//! ```json
//! {
//!   "coord": { "lat": 48.85, "lon": 2.35 },
//!   "weather": [{ "main": "Rain", "description": "light rain" }],
//!   "main": { "temp": 14.2, "feels_like": 13.6, "humidity": 82 },
//!   "wind": { "speed": 4.1 },
//!   "rain": { "1h": 0.4 }
//! }
//! ```
//!
//! `rain` and `snow` are optional, as is their `1h` key; missing amounts read
//! as zero. Unrelated keys are ignored.

use serde::Deserialize;

use crate::error::ObservationError;
use crate::types::{Coordinates, WeatherCondition, WeatherObservation, DEFAULT_UV_INDEX};

#[derive(Debug, Deserialize)]
struct CurrentWeatherPayload {
    coord: CoordPayload,
    weather: Vec<ConditionPayload>,
    main: MainPayload,
    wind: WindPayload,
    #[serde(default)]
    rain: Option<PrecipitationPayload>,
    #[serde(default)]
    snow: Option<PrecipitationPayload>,
}

#[derive(Debug, Deserialize)]
struct CoordPayload {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionPayload {
    main: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainPayload {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct WindPayload {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct PrecipitationPayload {
    #[serde(rename = "1h", default)]
    one_hour: f64,
}

impl WeatherObservation {
    /// Parse a current-weather JSON document.
    ///
    /// The UV index is set to [`DEFAULT_UV_INDEX`]; callers attach a looked-up
    /// value with [`WeatherObservation::with_uv_index`].
    pub fn from_json(raw: &str) -> Result<Self, ObservationError> {
        let payload: CurrentWeatherPayload = serde_json::from_str(raw)?;
        Self::from_payload(payload)
    }

    /// Same as [`WeatherObservation::from_json`] for an already-parsed value
    pub fn from_value(value: serde_json::Value) -> Result<Self, ObservationError> {
        let payload: CurrentWeatherPayload = serde_json::from_value(value)?;
        Self::from_payload(payload)
    }

    fn from_payload(payload: CurrentWeatherPayload) -> Result<Self, ObservationError> {
        let primary = payload
            .weather
            .into_iter()
            .next()
            .ok_or(ObservationError::MissingCondition)?;

        let amount = |p: Option<PrecipitationPayload>| p.map_or(0.0, |p| p.one_hour.max(0.0));

        Ok(Self {
            temperature: payload.main.temp,
            feels_like: payload.main.feels_like,
            humidity: payload.main.humidity,
            wind_speed: payload.wind.speed.max(0.0),
            rain_mm: amount(payload.rain),
            snow_mm: amount(payload.snow),
            condition: WeatherCondition::from_main(&primary.main),
            description: primary.description,
            coordinates: Coordinates {
                lat: payload.coord.lat,
                lon: payload.coord.lon,
            },
            uv_index: DEFAULT_UV_INDEX,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "coord": { "lon": 2.35, "lat": 48.85 },
            "weather": [
                { "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" },
                { "id": 701, "main": "Mist", "description": "mist", "icon": "50d" }
            ],
            "main": { "temp": 14.2, "feels_like": 13.6, "humidity": 82, "pressure": 1012 },
            "wind": { "speed": 4.1, "deg": 240 },
            "rain": { "1h": 0.4 },
            "name": "Paris"
        })
    }

    #[test]
    fn test_parse_full_payload() {
        let obs = WeatherObservation::from_value(payload()).unwrap();
        assert_eq!(obs.temperature, 14.2);
        assert_eq!(obs.feels_like, 13.6);
        assert_eq!(obs.humidity, 82.0);
        assert_eq!(obs.wind_speed, 4.1);
        assert_eq!(obs.rain_mm, 0.4);
        assert_eq!(obs.snow_mm, 0.0);
        assert_eq!(obs.condition, WeatherCondition::Rain);
        assert_eq!(obs.description, "light rain");
        assert_eq!(obs.coordinates, Coordinates { lat: 48.85, lon: 2.35 });
        assert_eq!(obs.uv_index, DEFAULT_UV_INDEX);
    }

    #[test]
    fn test_missing_precipitation_defaults_to_zero() {
        let mut value = payload();
        let map = value.as_object_mut().unwrap();
        map.remove("rain");
        map.insert("snow".into(), json!({ "3h": 2.0 }));

        let obs = WeatherObservation::from_value(value).unwrap();
        assert_eq!(obs.rain_mm, 0.0);
        assert_eq!(obs.snow_mm, 0.0);
    }

    #[test]
    fn test_snow_amount_is_read() {
        let mut value = payload();
        value["snow"] = json!({ "1h": 1.5 });
        let obs = WeatherObservation::from_value(value).unwrap();
        assert_eq!(obs.snow_mm, 1.5);
    }

    #[test]
    fn test_empty_weather_array() {
        let mut value = payload();
        value["weather"] = json!([]);
        let err = WeatherObservation::from_value(value).unwrap_err();
        assert!(matches!(err, ObservationError::MissingCondition));
    }

    #[test]
    fn test_missing_required_field() {
        let mut value = payload();
        value["main"].as_object_mut().unwrap().remove("humidity");
        let err = WeatherObservation::from_value(value).unwrap_err();
        assert!(matches!(err, ObservationError::Malformed(_)));
    }

    #[test]
    fn test_from_json_string() {
        let raw = payload().to_string();
        let obs = WeatherObservation::from_json(&raw).unwrap();
        assert_eq!(obs.condition, WeatherCondition::Rain);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(WeatherObservation::from_json("not json").is_err());
    }

    #[test]
    fn test_unknown_condition() {
        let mut value = payload();
        value["weather"] = json!([{ "main": "Volcano", "description": "???" }]);
        let obs = WeatherObservation::from_value(value).unwrap();
        assert_eq!(obs.condition, WeatherCondition::Unknown);
    }
}
