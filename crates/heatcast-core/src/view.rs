//! Collaborator contract for drawing the forecast.
//!
//! The engine publishes plain view models; how they reach a screen is the
//! implementor's business.

use serde::{Deserialize, Serialize};

/// Heat stress band of a temperature reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatLevel {
    /// Below the caution threshold.
    Normal,
    /// Spraying should avoid the hottest hours.
    Caution,
    /// Spraying is unsafe.
    Unsafe,
}

impl HeatLevel {
    /// Short machine-friendly name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Caution => "caution",
            Self::Unsafe => "unsafe",
        }
    }
}

impl std::fmt::Display for HeatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column of the forecast bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBar {
    /// Days after today (0 is today).
    pub offset: usize,
    /// Short weekday name.
    pub label: String,
    /// Underlying reading in degrees Celsius.
    pub temperature: f64,
    /// Rounded display text, e.g. `37°C`.
    pub text: String,
    /// Fill height as a percentage of the bar.
    pub height_percent: u8,
    /// Heat band of the reading.
    pub level: HeatLevel,
    /// CSS background for the fill.
    pub color: &'static str,
}

/// Status panel contents for the current reading.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Location the forecast belongs to.
    pub location: String,
    /// Current reading in degrees Celsius.
    pub temperature: f64,
    /// Rounded display text.
    pub text: String,
    /// Jittered "feels like" display text.
    pub real_feel_text: String,
    /// Heat band of the reading.
    pub level: HeatLevel,
    /// CSS background for the status indicator.
    pub color: &'static str,
    /// Advice line; empty for normal readings.
    pub advice: &'static str,
}

/// Draws the forecast chart.
pub trait ForecastRenderer: Send + Sync {
    /// Replaces the whole chart.
    fn render_forecast(&self, bars: &[DayBar]);

    /// Redraws only today's bar.
    fn update_first_bar(&self, bar: &DayBar);
}

/// Shows the current reading, its status colour, and advice.
pub trait StatusPresenter: Send + Sync {
    /// Updates the status panel.
    fn present_current(&self, conditions: &CurrentConditions);
}

/// Both collaborators behind one object.
pub trait ForecastView: ForecastRenderer + StatusPresenter {}

impl<T: ForecastRenderer + StatusPresenter + ?Sized> ForecastView for T {}
