//! Scoring-specific error types.

use thiserror::Error;

/// Failure to read a weather payload into an observation
#[derive(Error, Debug)]
pub enum ObservationError {
    #[error("Malformed weather payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Weather payload has no condition entries")]
    MissingCondition,
}

impl ObservationError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Malformed(e) => format!("Weather data could not be read: {}", e),
            Self::MissingCondition => "Weather data has no current condition".to_string(),
        }
    }
}

/// Failure of the UV index lookup. Never fatal to scoring.
#[derive(Error, Debug)]
pub enum UvLookupError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("UV service returned status {0}")]
    Status(u16),

    #[error("Invalid UV index: {0}")]
    InvalidValue(f64),

    #[error("UV lookup unavailable: {0}")]
    Unavailable(String),
}

impl UvLookupError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "UV service unreachable".to_string(),
            Self::Status(code) => format!("UV service error (HTTP {})", code),
            Self::InvalidValue(_) => "UV service returned an invalid index".to_string(),
            Self::Unavailable(_) => "UV service unavailable".to_string(),
        }
    }
}
