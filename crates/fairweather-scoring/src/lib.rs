//! Weather suitability scoring for activities.
//!
//! Turns a weather observation and an activity's sensitivity tags into a
//! 0–100 score and a recommendation message. Scoring itself is pure; the only
//! external interaction is the UV index lookup, whose failures fall back to a
//! moderate default.

pub mod combine;
pub mod error;
pub mod evaluator;
pub mod factors;
pub mod message;
pub mod observation;
pub mod recommend;
pub mod tags;
pub mod types;
pub mod uv;

pub use combine::{score_observation, FactorWeights, FACTOR_WEIGHTS, INDOOR_SCORE};
pub use error::{ObservationError, UvLookupError};
pub use evaluator::Evaluator;
pub use message::{classify_message, RecommendationBand};
pub use recommend::{
    rank_activities, recommend_activity, Activity, ActivityRecommendation, RankingOptions,
    Recommendation, WeatherDetails,
};
pub use tags::{ActivityTags, SensitivityTag};
pub use types::*;
pub use uv::{resolve_uv_index, FixedUvIndex, HttpUvLookup, UvLookup, UvReading};
