//! Weighted combination of factor sub-scores and cross-factor adjustments.

use tracing::debug;

use crate::factors::{
    precipitation_score, temperature_score, uv_score, visibility_score, wind_score,
};
use crate::tags::{ActivityTags, SensitivityTag};
use crate::types::{FactorScores, ScoreResult, WeatherObservation};

/// Relative weight of each factor in the combined score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorWeights {
    pub temperature: f64,
    pub precipitation: f64,
    pub wind: f64,
    pub visibility: f64,
    pub uv: f64,
}

impl FactorWeights {
    pub fn sum(&self) -> f64 {
        self.temperature + self.precipitation + self.wind + self.visibility + self.uv
    }
}

pub const FACTOR_WEIGHTS: FactorWeights = FactorWeights {
    temperature: 0.30,
    precipitation: 0.25,
    wind: 0.15,
    visibility: 0.10,
    uv: 0.20,
};

/// Score given to indoor activities, whatever the weather
pub const INDOOR_SCORE: u8 = 100;

/// Compute all five sub-scores for an observation
pub fn factor_scores(observation: &WeatherObservation, tags: &ActivityTags) -> FactorScores {
    FactorScores {
        temperature: temperature_score(observation.feels_like, observation.humidity, tags),
        precipitation: precipitation_score(
            observation.rain_mm,
            observation.snow_mm,
            observation.condition,
            tags,
        ),
        wind: wind_score(observation.wind_speed, tags),
        visibility: visibility_score(observation.humidity, observation.condition),
        uv: uv_score(observation.uv_index, tags),
    }
}

/// Weighted sum of the sub-scores, rounded to the nearest integer
pub fn weighted_score(scores: &FactorScores, weights: &FactorWeights) -> i32 {
    let total = scores.temperature * weights.temperature
        + scores.precipitation * weights.precipitation
        + scores.wind * weights.wind
        + scores.visibility * weights.visibility
        + scores.uv * weights.uv;

    total.round() as i32
}

/// Additive bonus or penalty for joint conditions.
///
/// Reads raw observation fields, not sub-scores. Every rule is independent and
/// any number of them may fire.
pub fn combination_adjustment(observation: &WeatherObservation, tags: &ActivityTags) -> i32 {
    let temp = observation.temperature;
    let rain = observation.rain_mm;
    let wind = observation.wind_speed;
    let humidity = observation.humidity;
    let uv = observation.uv_index;

    let mut adjustment = 0;

    // Rain driven by wind
    if rain > 0.1 && wind > 8.0 {
        adjustment -= 15;
    }

    // Muggy heat
    if temp > 30.0 && humidity > 80.0 {
        adjustment -= 25;
    }

    // Wind chill
    if temp < 5.0 && wind > 10.0 {
        adjustment -= 30;
    }

    if uv > 8.0 && tags.contains(SensitivityTag::SunCritical) {
        adjustment -= 20;
    }

    // Ideal outdoor day
    if (18.0..=25.0).contains(&temp) && rain == 0.0 && wind < 5.0 && (3.0..=6.0).contains(&uv) {
        adjustment += 15;
    }

    // Unreachable through score_observation: indoor tags return INDOOR_SCORE first.
    if tags.is_indoor() && (rain > 0.0 || temp < 5.0 || temp > 30.0) {
        adjustment += 10;
    }

    adjustment
}

fn clamp_final(score: i32) -> u8 {
    score.clamp(0, 100) as u8
}

/// Score an observation whose UV index has already been resolved.
///
/// Pure: the same observation and tags always give the same result.
pub fn score_observation(observation: &WeatherObservation, tags: &ActivityTags) -> ScoreResult {
    if tags.is_indoor() {
        debug!("Indoor activity, weather ignored");
        return ScoreResult::from_score(INDOOR_SCORE, None);
    }

    let scores = factor_scores(observation, tags);
    let weighted = weighted_score(&scores, &FACTOR_WEIGHTS);
    let adjustment = combination_adjustment(observation, tags);
    let score = clamp_final(weighted + adjustment);

    debug!(
        temperature = scores.temperature,
        precipitation = scores.precipitation,
        wind = scores.wind,
        visibility = scores.visibility,
        uv = scores.uv,
        weighted,
        adjustment,
        score,
        "Scored observation for tags {}",
        tags
    );

    ScoreResult::from_score(score, Some(scores))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WeatherCondition;

    fn tags(raw: &[&str]) -> ActivityTags {
        raw.iter().collect()
    }

    fn mild_day() -> WeatherObservation {
        WeatherObservation::new(22.0, 22.0, 50.0, 3.0)
            .with_condition(WeatherCondition::Clear, "clear sky")
            .with_uv_index(4.0)
    }

    #[test]
    fn test_weights_sum_to_one() {
        assert!((FACTOR_WEIGHTS.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_score_rounds_to_nearest() {
        let mut scores = FactorScores {
            temperature: 100.0,
            precipitation: 10.4,
            wind: 100.0,
            visibility: 100.0,
            uv: 100.0,
        };
        // 30 + 2.6 + 15 + 10 + 20
        assert_eq!(weighted_score(&scores, &FACTOR_WEIGHTS), 78);

        scores.precipitation = 9.6;
        assert_eq!(weighted_score(&scores, &FACTOR_WEIGHTS), 77);
    }

    #[test]
    fn test_ideal_day_bonus() {
        assert_eq!(combination_adjustment(&mild_day(), &ActivityTags::new()), 15);
    }

    #[test]
    fn test_ideal_day_bonus_requires_dry_weather() {
        let obs = mild_day().with_precipitation(0.05, 0.0);
        assert_eq!(combination_adjustment(&obs, &ActivityTags::new()), 0);
    }

    #[test]
    fn test_ideal_day_bonus_requires_moderate_uv() {
        let obs = mild_day().with_uv_index(7.0);
        assert_eq!(combination_adjustment(&obs, &ActivityTags::new()), 0);
        let obs = mild_day().with_uv_index(6.0);
        assert_eq!(combination_adjustment(&obs, &ActivityTags::new()), 15);
    }

    #[test]
    fn test_rain_and_wind_penalty() {
        let obs = WeatherObservation::new(15.0, 15.0, 60.0, 9.0).with_precipitation(0.5, 0.0);
        assert_eq!(combination_adjustment(&obs, &ActivityTags::new()), -15);
    }

    #[test]
    fn test_muggy_heat_penalty_uses_air_temperature() {
        let obs = WeatherObservation::new(31.0, 25.0, 85.0, 2.0);
        assert_eq!(combination_adjustment(&obs, &ActivityTags::new()), -25);
        let obs = WeatherObservation::new(29.0, 35.0, 85.0, 2.0);
        assert_eq!(combination_adjustment(&obs, &ActivityTags::new()), 0);
    }

    #[test]
    fn test_wind_chill_penalty() {
        let obs = WeatherObservation::new(2.0, -3.0, 60.0, 12.0);
        assert_eq!(combination_adjustment(&obs, &ActivityTags::new()), -30);
    }

    #[test]
    fn test_sun_critical_high_uv_penalty() {
        let obs = WeatherObservation::new(15.0, 15.0, 60.0, 2.0).with_uv_index(9.0);
        assert_eq!(combination_adjustment(&obs, &tags(&["sun-critical"])), -20);
        assert_eq!(combination_adjustment(&obs, &tags(&["sun-sensitive"])), 0);
    }

    #[test]
    fn test_penalties_stack() {
        let obs = WeatherObservation::new(2.0, -3.0, 60.0, 12.0)
            .with_precipitation(1.0, 0.0)
            .with_uv_index(9.0);
        assert_eq!(combination_adjustment(&obs, &tags(&["sun-critical"])), -65);
    }

    #[test]
    fn test_indoor_bad_weather_bonus_is_computed_but_never_reached() {
        let obs = WeatherObservation::new(2.0, 2.0, 60.0, 2.0).with_uv_index(1.0);
        let indoor = tags(&["indoor"]);
        assert_eq!(combination_adjustment(&obs, &indoor), 10);
        assert_eq!(score_observation(&obs, &indoor).score, INDOOR_SCORE);
    }

    #[test]
    fn test_indoor_short_circuit() {
        let storm = WeatherObservation::new(-10.0, -18.0, 99.0, 30.0)
            .with_precipitation(20.0, 10.0)
            .with_condition(WeatherCondition::Thunderstorm, "heavy thunderstorm")
            .with_uv_index(12.0);
        let result = score_observation(&storm, &tags(&["indoor", "rain-prohibited"]));
        assert_eq!(result.score, 100);
        assert!(result.breakdown.is_none());
    }

    #[test]
    fn test_mild_clear_day_is_perfect() {
        let result = score_observation(&mild_day(), &ActivityTags::new());
        assert_eq!(result.score, 100);
        let breakdown = result.breakdown.unwrap();
        assert!(breakdown.iter().all(|s| s == 100.0));
    }

    #[test]
    fn test_final_score_clamped_at_zero() {
        let obs = WeatherObservation::new(2.0, -8.0, 95.0, 30.0)
            .with_precipitation(10.0, 5.0)
            .with_condition(WeatherCondition::Thunderstorm, "thunderstorm with heavy rain")
            .with_uv_index(12.0);
        let result = score_observation(
            &obs,
            &tags(&["temp-sensitive", "rain-prohibited", "wind-sensitive", "sun-critical"]),
        );
        assert_eq!(result.score, 0);
    }
}
