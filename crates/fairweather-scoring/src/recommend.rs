//! Scoring a catalogue of activities against one observation.

use serde::{Deserialize, Serialize};

use crate::combine::score_observation;
use crate::tags::ActivityTags;
use crate::types::WeatherObservation;

/// An activity that can be recommended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub tags: ActivityTags,
}

/// Weather snapshot reported alongside a recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherDetails {
    pub temperature: f64,
    pub conditions: String,
    pub humidity: f64,
    pub wind_speed: f64,
    pub uv_index: f64,
}

impl From<&WeatherObservation> for WeatherDetails {
    fn from(obs: &WeatherObservation) -> Self {
        let conditions = if obs.description.is_empty() {
            obs.condition.description().to_string()
        } else {
            obs.description.clone()
        };

        Self {
            temperature: obs.temperature,
            conditions,
            humidity: obs.humidity,
            wind_speed: obs.wind_speed,
            uv_index: obs.uv_index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub score: u8,
    pub recommendation: String,
    pub details: WeatherDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecommendation {
    pub activity: Activity,
    pub recommendation: Recommendation,
}

impl ActivityRecommendation {
    pub fn score(&self) -> u8 {
        self.recommendation.score
    }
}

/// Filtering and truncation applied when ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingOptions {
    /// Activities scoring below this are dropped
    pub min_score: u8,
    /// Maximum number of results
    pub limit: usize,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            min_score: 5,
            limit: 10,
        }
    }
}

/// Score a single activity. The observation's UV index must already be resolved.
pub fn recommend_activity(observation: &WeatherObservation, activity: &Activity) -> ActivityRecommendation {
    let result = score_observation(observation, &activity.tags);

    ActivityRecommendation {
        activity: activity.clone(),
        recommendation: Recommendation {
            score: result.score,
            recommendation: result.message,
            details: WeatherDetails::from(observation),
        },
    }
}

/// Best activities for the observation, highest score first.
///
/// Ties keep catalogue order.
pub fn rank_activities(
    observation: &WeatherObservation,
    activities: &[Activity],
    options: RankingOptions,
) -> Vec<ActivityRecommendation> {
    let mut ranked: Vec<ActivityRecommendation> = activities
        .iter()
        .map(|activity| recommend_activity(observation, activity))
        .filter(|rec| rec.score() >= options.min_score)
        .collect();

    ranked.sort_by(|a, b| b.score().cmp(&a.score()));
    ranked.truncate(options.limit);

    tracing::debug!(
        "Ranked {} of {} activities (min score {}, limit {})",
        ranked.len(),
        activities.len(),
        options.min_score,
        options.limit
    );

    ranked
}
