//! Activity sensitivity tags and the per-factor profiles derived from them.
//!
//! Each factor reads at most one profile from the tag set. When an activity
//! carries several tags from the same family, the first match in the order
//! listed on each profile's `from_tags` wins.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Recognized sensitivity markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SensitivityTag {
    Indoor,
    TempSensitive,
    TempMin,
    TempMax,
    RainProhibited,
    RainSensitive,
    WindSensitive,
    WindModerate,
    SunCritical,
    SunSensitive,
}

impl SensitivityTag {
    /// Exact, case-sensitive match against the tag vocabulary
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "indoor" => Some(Self::Indoor),
            "temp-sensitive" => Some(Self::TempSensitive),
            "temp-min" => Some(Self::TempMin),
            "temp-max" => Some(Self::TempMax),
            "rain-prohibited" => Some(Self::RainProhibited),
            "rain-sensitive" => Some(Self::RainSensitive),
            "wind-sensitive" => Some(Self::WindSensitive),
            "wind-moderate" => Some(Self::WindModerate),
            "sun-critical" => Some(Self::SunCritical),
            "sun-sensitive" => Some(Self::SunSensitive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indoor => "indoor",
            Self::TempSensitive => "temp-sensitive",
            Self::TempMin => "temp-min",
            Self::TempMax => "temp-max",
            Self::RainProhibited => "rain-prohibited",
            Self::RainSensitive => "rain-sensitive",
            Self::WindSensitive => "wind-sensitive",
            Self::WindModerate => "wind-moderate",
            Self::SunCritical => "sun-critical",
            Self::SunSensitive => "sun-sensitive",
        }
    }
}

impl fmt::Display for SensitivityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of recognized tags on an activity. Unknown strings are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ActivityTags {
    tags: BTreeSet<SensitivityTag>,
}

impl ActivityTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, tag: SensitivityTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Indoor activities ignore the weather entirely
    pub fn is_indoor(&self) -> bool {
        self.contains(SensitivityTag::Indoor)
    }

    pub fn insert(&mut self, tag: SensitivityTag) {
        self.tags.insert(tag);
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = SensitivityTag> + '_ {
        self.tags.iter().copied()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ActivityTags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let tags = iter
            .into_iter()
            .filter_map(|s| SensitivityTag::parse(s.as_ref()))
            .collect();
        Self { tags }
    }
}

impl From<Vec<String>> for ActivityTags {
    fn from(raw: Vec<String>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<ActivityTags> for Vec<String> {
    fn from(tags: ActivityTags) -> Self {
        tags.iter().map(|t| t.as_str().to_string()).collect()
    }
}

impl fmt::Display for ActivityTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(",");
        write!(f, "[{}]", joined)
    }
}

/// How an activity reacts to temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureProfile {
    /// Narrow comfortable band
    Sensitive,
    /// Needs warmth (swimming)
    ColdAverse,
    /// Suffers in heat (intense sport)
    HeatAverse,
    General,
}

impl TemperatureProfile {
    /// `temp-sensitive` > `temp-min` > `temp-max`
    pub fn from_tags(tags: &ActivityTags) -> Self {
        if tags.contains(SensitivityTag::TempSensitive) {
            Self::Sensitive
        } else if tags.contains(SensitivityTag::TempMin) {
            Self::ColdAverse
        } else if tags.contains(SensitivityTag::TempMax) {
            Self::HeatAverse
        } else {
            Self::General
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecipitationProfile {
    Prohibited,
    Sensitive,
    General,
}

impl PrecipitationProfile {
    /// `rain-prohibited` > `rain-sensitive`
    pub fn from_tags(tags: &ActivityTags) -> Self {
        if tags.contains(SensitivityTag::RainProhibited) {
            Self::Prohibited
        } else if tags.contains(SensitivityTag::RainSensitive) {
            Self::Sensitive
        } else {
            Self::General
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindProfile {
    Sensitive,
    Moderate,
    General,
}

impl WindProfile {
    /// `wind-sensitive` > `wind-moderate`
    pub fn from_tags(tags: &ActivityTags) -> Self {
        if tags.contains(SensitivityTag::WindSensitive) {
            Self::Sensitive
        } else if tags.contains(SensitivityTag::WindModerate) {
            Self::Moderate
        } else {
            Self::General
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunProfile {
    Critical,
    Sensitive,
    General,
}

impl SunProfile {
    /// `sun-critical` > `sun-sensitive`
    pub fn from_tags(tags: &ActivityTags) -> Self {
        if tags.contains(SensitivityTag::SunCritical) {
            Self::Critical
        } else if tags.contains(SensitivityTag::SunSensitive) {
            Self::Sensitive
        } else {
            Self::General
        }
    }
}
