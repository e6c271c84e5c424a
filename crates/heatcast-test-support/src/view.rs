//! Test view — records everything the engine publishes.

use std::sync::Mutex;

use heatcast_core::view::{CurrentConditions, DayBar, ForecastRenderer, StatusPresenter};

/// A renderer and presenter that keeps every call for later inspection.
#[derive(Debug, Default)]
pub struct RecordingView {
    charts: Mutex<Vec<Vec<DayBar>>>,
    first_bar_updates: Mutex<Vec<DayBar>>,
    conditions: Mutex<Vec<CurrentConditions>>,
}

impl RecordingView {
    /// Create an empty recording view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every full chart rendered, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn charts(&self) -> Vec<Vec<DayBar>> {
        self.charts.lock().unwrap().clone()
    }

    /// Every single-bar update, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn first_bar_updates(&self) -> Vec<DayBar> {
        self.first_bar_updates.lock().unwrap().clone()
    }

    /// Every status panel update, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn conditions(&self) -> Vec<CurrentConditions> {
        self.conditions.lock().unwrap().clone()
    }

    /// The most recent status panel update.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn last_conditions(&self) -> Option<CurrentConditions> {
        self.conditions.lock().unwrap().last().cloned()
    }
}

impl ForecastRenderer for RecordingView {
    fn render_forecast(&self, bars: &[DayBar]) {
        self.charts.lock().unwrap().push(bars.to_vec());
    }

    fn update_first_bar(&self, bar: &DayBar) {
        self.first_bar_updates.lock().unwrap().push(bar.clone());
    }
}

impl StatusPresenter for RecordingView {
    fn present_current(&self, conditions: &CurrentConditions) {
        self.conditions.lock().unwrap().push(conditions.clone());
    }
}
