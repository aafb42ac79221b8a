//! The five factor scorers.
//!
//! Every scorer starts from a base of 100, applies tag-dependent penalties and
//! bonuses, and clamps its result to [0, 100]. Scorers are independent of each
//! other and read only the fields they are given.

use crate::tags::{
    ActivityTags, PrecipitationProfile, SunProfile, TemperatureProfile, WindProfile,
};
use crate::types::WeatherCondition;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

pub(crate) fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return MIN_SCORE;
    }
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Feels-like temperature adjusted for humidity: muggy heat feels hotter,
/// damp cold feels colder.
pub fn effective_temperature(feels_like: f64, humidity: f64) -> f64 {
    let mut effective = feels_like;

    if effective > 27.0 && humidity > 70.0 {
        effective += (humidity - 70.0) * 0.1;
    }

    if effective < 10.0 && humidity > 80.0 {
        effective -= (humidity - 80.0) * 0.05;
    }

    effective
}

/// Temperature sub-score from the feels-like temperature and humidity
pub fn temperature_score(feels_like: f64, humidity: f64, tags: &ActivityTags) -> f64 {
    let t = effective_temperature(feels_like, humidity);
    let mut score = 100.0;

    match TemperatureProfile::from_tags(tags) {
        TemperatureProfile::Sensitive => {
            return if !(8.0..=35.0).contains(&t) {
                20.0
            } else if !(12.0..=30.0).contains(&t) {
                40.0
            } else if !(16.0..=27.0).contains(&t) {
                70.0
            } else if (20.0..=24.0).contains(&t) {
                95.0
            } else {
                80.0
            };
        }
        TemperatureProfile::ColdAverse => {
            if t < 18.0 {
                score -= 70.0;
            } else if t < 22.0 {
                score -= 40.0;
            } else if t < 25.0 {
                score -= 20.0;
            }

            if (25.0..=30.0).contains(&t) {
                score += 20.0;
            } else if t > 30.0 {
                score -= 10.0;
            }
        }
        TemperatureProfile::HeatAverse => {
            if t > 32.0 {
                score -= 70.0;
            } else if t > 28.0 {
                score -= 50.0;
            } else if t > 25.0 {
                score -= 30.0;
            }

            if (15.0..=22.0).contains(&t) {
                score += 20.0;
            } else if t < 10.0 {
                score -= 20.0;
            }
        }
        TemperatureProfile::General => {
            if (18.0..=25.0).contains(&t) {
                score += 15.0;
            } else if t < 5.0 || t > 35.0 {
                score -= 50.0;
            } else if t < 10.0 || t > 30.0 {
                score -= 30.0;
            } else if t < 15.0 || t > 27.0 {
                score -= 15.0;
            }
        }
    }

    clamp_score(score)
}

/// Precipitation sub-score from last-hour rain and snow amounts
pub fn precipitation_score(
    rain_mm: f64,
    snow_mm: f64,
    condition: WeatherCondition,
    tags: &ActivityTags,
) -> f64 {
    let raining = condition == WeatherCondition::Rain;
    let mut score = 100.0;

    match PrecipitationProfile::from_tags(tags) {
        PrecipitationProfile::Prohibited => {
            if rain_mm > 5.0 || raining {
                score -= 90.0;
            } else if rain_mm > 2.0 {
                score -= 70.0;
            } else if rain_mm > 0.5 {
                score -= 50.0;
            } else if rain_mm > 0.1 {
                score -= 30.0;
            }

            if snow_mm > 0.0 || condition == WeatherCondition::Snow {
                score -= 95.0;
            }
        }
        PrecipitationProfile::Sensitive => {
            if rain_mm > 2.0 || raining {
                score -= 60.0;
            } else if rain_mm > 0.5 {
                score -= 40.0;
            } else if rain_mm > 0.1 {
                score -= 20.0;
            }

            if snow_mm > 0.0 {
                score -= 50.0;
            }
        }
        PrecipitationProfile::General => {
            if rain_mm > 5.0 {
                score -= 40.0;
            } else if rain_mm > 2.0 {
                score -= 20.0;
            } else if rain_mm > 0.5 {
                score -= 10.0;
            }

            if snow_mm > 0.0 {
                score -= 30.0;
            }
        }
    }

    match condition {
        WeatherCondition::Thunderstorm => score -= 60.0,
        WeatherCondition::Drizzle => score -= 15.0,
        _ => {}
    }

    clamp_score(score)
}

/// Wind sub-score from wind speed in m/s
pub fn wind_score(wind_speed: f64, tags: &ActivityTags) -> f64 {
    let w = wind_speed;
    let mut score = 100.0;

    match WindProfile::from_tags(tags) {
        WindProfile::Sensitive => {
            if w > 15.0 {
                score -= 85.0;
            } else if w > 10.0 {
                score -= 65.0;
            } else if w > 6.0 {
                score -= 45.0;
            } else if w > 3.0 {
                score -= 25.0;
            } else if w < 1.0 {
                score += 10.0;
            }
        }
        WindProfile::Moderate => {
            if w > 20.0 {
                score -= 70.0;
            } else if w > 15.0 {
                score -= 50.0;
            } else if w > 10.0 {
                score -= 30.0;
            } else if w > 5.0 {
                score -= 15.0;
            }
        }
        WindProfile::General => {
            if w > 25.0 {
                score -= 40.0;
            } else if w > 15.0 {
                score -= 20.0;
            } else if w > 8.0 {
                score -= 10.0;
            }
        }
    }

    // Light breeze, whatever the profile; stacks with the calm bonus above
    if w > 1.0 && w < 4.0 {
        score += 5.0;
    }

    clamp_score(score)
}

/// Visibility sub-score from humidity and obscuring conditions
pub fn visibility_score(humidity: f64, condition: WeatherCondition) -> f64 {
    let mut score = 100.0;

    if humidity > 90.0 {
        score -= 40.0;
    } else if humidity > 80.0 {
        score -= 25.0;
    } else if humidity > 70.0 {
        score -= 10.0;
    }

    score -= condition.visibility_penalty();

    if condition.is_clear_sky() && humidity < 60.0 {
        score += 15.0;
    }

    clamp_score(score)
}

/// UV sub-score from the UV index
pub fn uv_score(uv_index: f64, tags: &ActivityTags) -> f64 {
    let uv = uv_index;
    let mut score = 100.0;

    match SunProfile::from_tags(tags) {
        SunProfile::Critical => {
            if uv >= 11.0 {
                score -= 80.0;
            } else if uv >= 8.0 {
                score -= 60.0;
            } else if uv >= 6.0 {
                score -= 40.0;
            } else if uv >= 3.0 {
                score -= 10.0;
            } else {
                score += 15.0;
            }
        }
        SunProfile::Sensitive => {
            if uv >= 11.0 {
                score -= 60.0;
            } else if uv >= 8.0 {
                score -= 40.0;
            } else if uv >= 6.0 {
                score -= 20.0;
            } else if uv >= 3.0 {
                score -= 5.0;
            }
        }
        SunProfile::General => {
            if uv >= 11.0 {
                score -= 30.0;
            } else if uv >= 8.0 {
                score -= 15.0;
            } else if uv >= 6.0 {
                score -= 5.0;
            }
        }
    }

    clamp_score(score)
}
