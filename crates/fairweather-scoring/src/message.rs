//! Recommendation bands: the verdict attached to a final score.

use serde::{Deserialize, Serialize};

/// The eight ordered verdict bands, best first.
///
/// Each band covers scores from its lower bound (inclusive) up to the next
/// band's lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationBand {
    Excellent,
    VeryGood,
    Good,
    Acceptable,
    Mixed,
    Difficult,
    Bad,
    Critical,
}

impl RecommendationBand {
    pub const ALL: [RecommendationBand; 8] = [
        Self::Excellent,
        Self::VeryGood,
        Self::Good,
        Self::Acceptable,
        Self::Mixed,
        Self::Difficult,
        Self::Bad,
        Self::Critical,
    ];

    /// Lowest score that falls in this band
    pub fn lower_bound(&self) -> u8 {
        match self {
            Self::Excellent => 90,
            Self::VeryGood => 75,
            Self::Good => 60,
            Self::Acceptable => 50,
            Self::Mixed => 35,
            Self::Difficult => 20,
            Self::Bad => 10,
            Self::Critical => 0,
        }
    }

    /// First band, in descending order, whose lower bound the score reaches
    pub fn from_score(score: u8) -> Self {
        Self::ALL
            .into_iter()
            .find(|band| score >= band.lower_bound())
            .unwrap_or(Self::Critical)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT: Perfect conditions for your activity!",
            Self::VeryGood => "VERY GOOD: Very favourable conditions, ideal for heading out.",
            Self::Good => "GOOD: Good conditions, activity recommended.",
            Self::Acceptable => "ACCEPTABLE: Acceptable conditions, with some reservations.",
            Self::Mixed => "MIXED: Mixed conditions, plan an alternative.",
            Self::Difficult => "DIFFICULT: Unfavourable conditions, discouraged unless necessary.",
            Self::Bad => "BAD: Very unfavourable conditions, strongly discouraged.",
            Self::Critical => "CRITICAL: Extreme conditions, activity impossible!",
        }
    }
}

/// Recommendation text for a final score.
///
/// Usable on its own, e.g. to re-derive the message for a stored score.
pub fn classify_message(score: u8) -> &'static str {
    RecommendationBand::from_score(score).message()
}
