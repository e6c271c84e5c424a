//! Chart geometry and display text.

use chrono::{Days, NaiveDate};
use heatcast_core::view::{CurrentConditions, DayBar};

use super::generator::round_half_up;
use super::status::classify;

/// Reading mapped to an empty bar.
const SCALE_MIN: f64 = 28.0;
/// Reading mapped to a full bar.
const SCALE_MAX: f64 = 48.0;
/// Bars never shrink below this, so cold days stay visible.
const MIN_BAR_PERCENT: f64 = 6.0;

/// Fill height of a bar as a percentage, in `[6, 100]`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn bar_height_percent(temperature: f64) -> u8 {
    let pct = round_half_up((temperature - SCALE_MIN) / (SCALE_MAX - SCALE_MIN) * 100.0);
    pct.clamp(MIN_BAR_PERCENT, 100.0) as u8
}

/// Rounded display text, e.g. `37°C`.
#[must_use]
pub fn temperature_text(temperature: f64) -> String {
    format!("{}°C", round_half_up(temperature))
}

/// "Feels like" reading: the current reading jittered by up to -1.2/+1.8
/// degrees, then rounded. `draw` must lie in `[0, 1)`.
#[must_use]
pub fn real_feel(temperature: f64, draw: f64) -> f64 {
    round_half_up(temperature + (draw - 0.4) * 3.0)
}

/// Short weekday name of `today + offset` days.
#[must_use]
pub fn day_label(today: NaiveDate, offset: usize) -> String {
    u64::try_from(offset)
        .ok()
        .and_then(|days| today.checked_add_days(Days::new(days)))
        .map_or_else(String::new, |date| date.format("%a").to_string())
}

/// One chart column for a reading.
#[must_use]
pub fn day_bar(today: NaiveDate, offset: usize, temperature: f64) -> DayBar {
    let reading = classify(temperature);
    DayBar {
        offset,
        label: day_label(today, offset),
        temperature,
        text: temperature_text(temperature),
        height_percent: bar_height_percent(temperature),
        level: reading.level,
        color: reading.color,
    }
}

/// The full chart for a series of readings.
#[must_use]
pub fn day_bars(today: NaiveDate, readings: &[f64]) -> Vec<DayBar> {
    readings
        .iter()
        .enumerate()
        .map(|(offset, &temperature)| day_bar(today, offset, temperature))
        .collect()
}

/// Status panel contents for the current reading.
#[must_use]
pub fn current_conditions(location: &str, temperature: f64, real_feel_draw: f64) -> CurrentConditions {
    let reading = classify(temperature);
    CurrentConditions {
        location: location.to_owned(),
        temperature,
        text: temperature_text(temperature),
        real_feel_text: temperature_text(real_feel(temperature, real_feel_draw)),
        level: reading.level,
        color: reading.color,
        advice: reading.advice,
    }
}
