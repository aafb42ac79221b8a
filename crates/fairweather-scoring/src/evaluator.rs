//! Evaluation entry point: UV resolution followed by pure scoring.

use std::sync::Arc;

use crate::combine::{score_observation, INDOOR_SCORE};
use crate::recommend::{
    rank_activities, recommend_activity, Activity, ActivityRecommendation, RankingOptions,
};
use crate::tags::ActivityTags;
use crate::types::{ScoreResult, WeatherObservation};
use crate::uv::{resolve_uv_index, UvLookup, UvReading};

/// Scores activities against observations, fetching the UV index as needed.
///
/// Holds no mutable state; clones share the same lookup and may be used
/// concurrently.
#[derive(Clone)]
pub struct Evaluator {
    uv_lookup: Arc<dyn UvLookup>,
}

impl Evaluator {
    pub fn new(uv_lookup: Arc<dyn UvLookup>) -> Self {
        Self { uv_lookup }
    }

    /// Attach a freshly resolved UV index to the observation
    async fn with_resolved_uv(&self, observation: &WeatherObservation) -> (WeatherObservation, UvReading) {
        let reading = resolve_uv_index(self.uv_lookup.as_ref(), observation.coordinates).await;
        (observation.clone().with_uv_index(reading.value()), reading)
    }

    /// Score one activity's tags against the observation.
    ///
    /// Indoor activities return immediately without a UV lookup.
    pub async fn evaluate(&self, observation: &WeatherObservation, tags: &ActivityTags) -> ScoreResult {
        if tags.is_indoor() {
            return ScoreResult::from_score(INDOOR_SCORE, None);
        }

        let (observation, reading) = self.with_resolved_uv(observation).await;
        let result = score_observation(&observation, tags);

        tracing::info!(
            score = result.score,
            uv_fallback = reading.is_fallback(),
            "Evaluated {} under {} ({:.1} °C)",
            tags,
            observation.condition.description(),
            observation.temperature
        );

        result
    }

    /// Build the full recommendation for one activity
    pub async fn recommend(&self, observation: &WeatherObservation, activity: &Activity) -> ActivityRecommendation {
        if activity.tags.is_indoor() {
            return recommend_activity(observation, activity);
        }

        let (observation, _) = self.with_resolved_uv(observation).await;
        recommend_activity(&observation, activity)
    }

    /// Rank a catalogue of activities.
    ///
    /// The UV index is resolved at most once, and not at all when every
    /// activity is indoor.
    pub async fn rank(
        &self,
        observation: &WeatherObservation,
        activities: &[Activity],
        options: RankingOptions,
    ) -> Vec<ActivityRecommendation> {
        if activities.iter().all(|a| a.tags.is_indoor()) {
            return rank_activities(observation, activities, options);
        }

        let (observation, reading) = self.with_resolved_uv(observation).await;
        let ranked = rank_activities(&observation, activities, options);

        tracing::info!(
            ranked = ranked.len(),
            uv_fallback = reading.is_fallback(),
            "Ranked {} activities",
            activities.len()
        );

        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UvLookupError;
    use crate::types::{Coordinates, WeatherCondition};
    use crate::uv::FixedUvIndex;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts lookups and always fails
    #[derive(Default)]
    struct CountingLookup {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl UvLookup for CountingLookup {
        async fn lookup_uv_index(&self, _c: Coordinates) -> Result<f64, UvLookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(UvLookupError::Status(500))
        }
    }

    fn observation() -> WeatherObservation {
        WeatherObservation::new(22.0, 22.0, 50.0, 3.0)
            .with_condition(WeatherCondition::Clear, "clear sky")
            .with_coordinates(43.6, 1.44)
    }

    fn tags(raw: &[&str]) -> ActivityTags {
        raw.iter().collect()
    }

    #[tokio::test]
    async fn test_indoor_skips_lookup() {
        let lookup = Arc::new(CountingLookup::default());
        let evaluator = Evaluator::new(lookup.clone());

        let result = evaluator.evaluate(&observation(), &tags(&["indoor"])).await;
        assert_eq!(result.score, 100);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_lookup_failure_uses_default() {
        let lookup = Arc::new(CountingLookup::default());
        let evaluator = Evaluator::new(lookup.clone());

        let with_failure = evaluator.evaluate(&observation(), &tags(&["sun-critical"])).await;
        let with_default = score_observation(
            &observation().with_uv_index(3.0),
            &tags(&["sun-critical"]),
        );
        assert_eq!(with_failure, with_default);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_measured_uv_is_applied() {
        let evaluator = Evaluator::new(Arc::new(FixedUvIndex(11.0)));
        let result = evaluator.evaluate(&observation(), &tags(&["sun-critical"])).await;
        let breakdown = result.breakdown.unwrap();
        assert_eq!(breakdown.uv, 20.0);
    }

    #[tokio::test]
    async fn test_rank_looks_up_once() {
        let lookup = Arc::new(CountingLookup::default());
        let evaluator = Evaluator::new(lookup.clone());
        let activities = vec![
            Activity { id: 1, title: "Run".into(), icon: None, tags: tags(&["temp-max"]) },
            Activity { id: 2, title: "Swim".into(), icon: None, tags: tags(&["temp-min"]) },
            Activity { id: 3, title: "Chess".into(), icon: None, tags: tags(&["indoor"]) },
        ];

        let ranked = evaluator
            .rank(&observation(), &activities, RankingOptions::default())
            .await;
        assert_eq!(ranked.len(), 3);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
        assert!(ranked.iter().all(|r| r.recommendation.details.uv_index == 3.0));
    }

    #[tokio::test]
    async fn test_rank_all_indoor_skips_lookup() {
        let lookup = Arc::new(CountingLookup::default());
        let evaluator = Evaluator::new(lookup.clone());
        let activities = vec![Activity {
            id: 1,
            title: "Bowling".into(),
            icon: None,
            tags: tags(&["indoor"]),
        }];

        let ranked = evaluator
            .rank(&observation(), &activities, RankingOptions::default())
            .await;
        assert_eq!(ranked.len(), 1);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_recommend_single_activity() {
        let evaluator = Evaluator::new(Arc::new(FixedUvIndex(4.0)));
        let activity = Activity {
            id: 9,
            title: "Cycling".into(),
            icon: Some("bike".into()),
            tags: tags(&["wind-moderate"]),
        };

        let rec = evaluator.recommend(&observation(), &activity).await;
        assert_eq!(rec.activity.id, 9);
        assert_eq!(rec.recommendation.details.uv_index, 4.0);
        assert_eq!(rec.score(), 100);
    }
}
