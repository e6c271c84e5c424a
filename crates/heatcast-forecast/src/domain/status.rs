//! Heat classification shared by the chart, the status panel, and advisories.

use heatcast_core::view::HeatLevel;

/// Readings at or above this are unsafe for spraying.
pub const UNSAFE_THRESHOLD: f64 = 41.0;

/// Readings at or above this call for caution.
pub const CAUTION_THRESHOLD: f64 = 38.0;

const UNSAFE_COLOR: &str = "linear-gradient(180deg,#ff9aa3,#f25c64)";
const CAUTION_COLOR: &str = "linear-gradient(180deg,#ffd06b,#f6b042)";
const NORMAL_COLOR: &str = "linear-gradient(180deg,#6ee7a9,#16c172)";

const UNSAFE_ADVICE: &str = "Next days unsafe for spraying. Plan irrigation today.";
const CAUTION_ADVICE: &str = "Caution: high temperatures — avoid spraying in hottest hours.";

/// Colour, band, and advice for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatReading {
    /// Heat band.
    pub level: HeatLevel,
    /// CSS background for bars and the status indicator.
    pub color: &'static str,
    /// Advice line; empty for normal readings.
    pub advice: &'static str,
}

/// Classifies a reading. Both thresholds are inclusive.
#[must_use]
pub fn classify(temperature: f64) -> HeatReading {
    if temperature >= UNSAFE_THRESHOLD {
        HeatReading {
            level: HeatLevel::Unsafe,
            color: UNSAFE_COLOR,
            advice: UNSAFE_ADVICE,
        }
    } else if temperature >= CAUTION_THRESHOLD {
        HeatReading {
            level: HeatLevel::Caution,
            color: CAUTION_COLOR,
            advice: CAUTION_ADVICE,
        }
    } else {
        HeatReading {
            level: HeatLevel::Normal,
            color: NORMAL_COLOR,
            advice: "",
        }
    }
}
