//! Seeded forecast generation.
//!
//! The seed is the location name followed by the calendar day, so every
//! caller asking about the same place on the same day sees the same series.

use chrono::NaiveDate;
use heatcast_core::rng::{DeterministicRng, SeededRng};
use serde::{Deserialize, Serialize};

/// Number of days in a forecast, today included.
pub const FORECAST_DAYS: usize = 15;

/// Location used when none is given.
pub const DEFAULT_LOCATION: &str = "Jalgaon";

/// Lowest temperature a freshly generated forecast may contain.
pub const GENERATED_MIN: i32 = 30;

/// Highest temperature a freshly generated forecast may contain.
pub const GENERATED_MAX: i32 = 46;

/// A freshly generated forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
    /// Location the forecast was seeded with.
    pub location: String,
    /// Calendar day of `temperatures[0]`.
    pub date: NaiveDate,
    /// Whole degrees Celsius for today through today + 14.
    pub temperatures: [i32; FORECAST_DAYS],
}

/// Rounds to the nearest integer, with halves going towards positive
/// infinity (`-1.5` becomes `-1`, `2.5` becomes `3`).
#[must_use]
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 { floor + 1.0 } else { floor }
}

#[allow(clippy::cast_possible_truncation)]
fn round_to_i32(x: f64) -> i32 {
    round_half_up(x) as i32
}

/// Falls back to [`DEFAULT_LOCATION`] for an empty name.
#[must_use]
pub fn effective_location(location: &str) -> &str {
    if location.is_empty() {
        DEFAULT_LOCATION
    } else {
        location
    }
}

/// Day-granular date string, e.g. `Mon Jan 01 2024`.
#[must_use]
pub fn day_string(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// Seed string for a location on a calendar day.
#[must_use]
pub fn seed_for(location: &str, date: NaiveDate) -> String {
    format!("{location}{}", day_string(date))
}

/// Generates the forecast for `location` on `today`.
#[must_use]
pub fn generate_forecast(location: &str, today: NaiveDate) -> Forecast {
    let location = effective_location(location);
    let mut rng = SeededRng::from_seed(&seed_for(location, today));
    Forecast {
        location: location.to_owned(),
        date: today,
        temperatures: generate_temperatures(&mut rng),
    }
}

/// Draws a 15-day series from `rng`.
///
/// A running base starts in `[36, 42]` and drifts by -1, 0, or +1 each day;
/// each emitted value adds its own -1/0/+1 noise and is clamped to
/// `[GENERATED_MIN, GENERATED_MAX]`. The base itself is never clamped, so a
/// long drift produces a plateau at the bound that persists until the base
/// wanders back.
pub fn generate_temperatures(rng: &mut dyn DeterministicRng) -> [i32; FORECAST_DAYS] {
    let mut base = 36 + round_to_i32(rng.next_f64() * 6.0);
    let mut temperatures = [0; FORECAST_DAYS];
    for temperature in &mut temperatures {
        base += round_to_i32((rng.next_f64() - 0.5) * 3.0);
        *temperature =
            (base + round_to_i32((rng.next_f64() - 0.5) * 3.0)).clamp(GENERATED_MIN, GENERATED_MAX);
    }
    temperatures
}
