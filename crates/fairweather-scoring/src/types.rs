use serde::{Deserialize, Serialize};

use crate::message::RecommendationBand;

/// UV index assumed when no measurement is available ("moderate")
pub const DEFAULT_UV_INDEX: f64 = 3.0;

/// Primary weather condition, as reported by the upstream provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    FewClouds,
    Clouds,
    Drizzle,
    Rain,
    Thunderstorm,
    Snow,
    Mist,
    Fog,
    Haze,
    Smoke,
    Dust,
    Sand,
    Ash,
    Squall,
    Tornado,
    #[default]
    Unknown,
}

impl WeatherCondition {
    /// Map a provider condition string ("Clear", "Rain", ...) by exact match.
    /// Unrecognized strings map to `Unknown`, which triggers no condition overlay.
    pub fn from_main(main: &str) -> Self {
        match main {
            "Clear" => Self::Clear,
            "Few clouds" => Self::FewClouds,
            "Clouds" => Self::Clouds,
            "Drizzle" => Self::Drizzle,
            "Rain" => Self::Rain,
            "Thunderstorm" => Self::Thunderstorm,
            "Snow" => Self::Snow,
            "Mist" => Self::Mist,
            "Fog" => Self::Fog,
            "Haze" => Self::Haze,
            "Smoke" => Self::Smoke,
            "Dust" => Self::Dust,
            "Sand" => Self::Sand,
            "Ash" => Self::Ash,
            "Squall" => Self::Squall,
            "Tornado" => Self::Tornado,
            _ => Self::Unknown,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::FewClouds => "Few clouds",
            Self::Clouds => "Clouds",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Thunderstorm => "Thunderstorm",
            Self::Snow => "Snow",
            Self::Mist => "Mist",
            Self::Fog => "Fog",
            Self::Haze => "Haze",
            Self::Smoke => "Smoke",
            Self::Dust => "Dust",
            Self::Sand => "Sand",
            Self::Ash => "Ash",
            Self::Squall => "Squall",
            Self::Tornado => "Tornado",
            Self::Unknown => "Unknown",
        }
    }

    /// Points taken off the visibility sub-score by obscuring conditions
    pub fn visibility_penalty(&self) -> f64 {
        match self {
            Self::Fog | Self::Mist => 50.0,
            Self::Haze | Self::Smoke => 30.0,
            _ => 0.0,
        }
    }

    /// Clear sky, or nearly so
    pub fn is_clear_sky(&self) -> bool {
        matches!(self, Self::Clear | Self::FewClouds)
    }
}

/// Geographic coordinates, used only to look up the UV index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A single weather reading in metric units.
///
/// Built fresh for every scoring call. `uv_index` holds `DEFAULT_UV_INDEX`
/// until a lookup result is attached with [`WeatherObservation::with_uv_index`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Air temperature, °C
    pub temperature: f64,
    /// Feels-like temperature, °C
    pub feels_like: f64,
    /// Relative humidity, %
    pub humidity: f64,
    /// Wind speed, m/s
    pub wind_speed: f64,
    /// Rain over the last hour, mm
    #[serde(default)]
    pub rain_mm: f64,
    /// Snow over the last hour, mm
    #[serde(default)]
    pub snow_mm: f64,
    pub condition: WeatherCondition,
    /// Free text for display only
    #[serde(default)]
    pub description: String,
    pub coordinates: Coordinates,
    #[serde(default = "default_uv_index")]
    pub uv_index: f64,
}

fn default_uv_index() -> f64 {
    DEFAULT_UV_INDEX
}

impl WeatherObservation {
    /// Observation with the given core readings; precipitation zero,
    /// condition `Clear`, coordinates at the origin, default UV index.
    pub fn new(temperature: f64, feels_like: f64, humidity: f64, wind_speed: f64) -> Self {
        Self {
            temperature,
            feels_like,
            humidity,
            wind_speed,
            rain_mm: 0.0,
            snow_mm: 0.0,
            condition: WeatherCondition::Clear,
            description: String::new(),
            coordinates: Coordinates::default(),
            uv_index: DEFAULT_UV_INDEX,
        }
    }

    pub fn with_precipitation(mut self, rain_mm: f64, snow_mm: f64) -> Self {
        self.rain_mm = rain_mm;
        self.snow_mm = snow_mm;
        self
    }

    pub fn with_condition(mut self, condition: WeatherCondition, description: impl Into<String>) -> Self {
        self.condition = condition;
        self.description = description.into();
        self
    }

    pub fn with_coordinates(mut self, lat: f64, lon: f64) -> Self {
        self.coordinates = Coordinates { lat, lon };
        self
    }

    pub fn with_uv_index(mut self, uv_index: f64) -> Self {
        self.uv_index = uv_index;
        self
    }
}

/// The five factor sub-scores behind a final score, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorScores {
    pub temperature: f64,
    pub precipitation: f64,
    pub wind: f64,
    pub visibility: f64,
    pub uv: f64,
}

impl FactorScores {
    pub fn iter(&self) -> impl Iterator<Item = f64> {
        [
            self.temperature,
            self.precipitation,
            self.wind,
            self.visibility,
            self.uv,
        ]
        .into_iter()
    }
}

/// Final suitability verdict for one activity under one observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Suitability score in [0, 100]
    pub score: u8,
    pub band: RecommendationBand,
    pub message: String,
    /// Sub-scores; absent when the activity is indoor and weather was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<FactorScores>,
}

impl ScoreResult {
    pub fn from_score(score: u8, breakdown: Option<FactorScores>) -> Self {
        let band = RecommendationBand::from_score(score);
        Self {
            score,
            band,
            message: band.message().to_string(),
            breakdown,
        }
    }
}
