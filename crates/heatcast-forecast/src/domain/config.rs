//! Tuning for the live update loop.

use std::time::Duration;

use heatcast_core::error::DomainError;

/// Parameters of the live perturbation loop.
///
/// `Default` reproduces the classic behaviour: a tick every 2.5 s nudging
/// today's reading by up to ±0.6 °C, tomorrow's on roughly 40% of ticks,
/// with both held inside `[28, 48]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveConfig {
    /// Time between ticks.
    pub tick_period: Duration,
    /// Full width of the per-tick jitter; a reading moves by at most half.
    pub jitter_span: f64,
    /// Tomorrow is nudged when a uniform draw exceeds this.
    pub next_day_threshold: f64,
    /// Lowest live reading.
    pub live_min: f64,
    /// Highest live reading.
    pub live_max: f64,
}

impl LiveConfig {
    /// Default config with a different tick period.
    #[must_use]
    pub fn with_tick_period(tick_period: Duration) -> Self {
        Self {
            tick_period,
            ..Self::default()
        }
    }

    /// Checks that the timer can run and the live range is well formed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a zero tick period, a
    /// non-finite or inverted live range, or a negative jitter span.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.tick_period.is_zero() {
            return Err(DomainError::Validation(
                "tick period must be greater than zero".to_owned(),
            ));
        }
        if !self.live_min.is_finite() || !self.live_max.is_finite() {
            return Err(DomainError::Validation(
                "live range bounds must be finite".to_owned(),
            ));
        }
        if self.live_min > self.live_max {
            return Err(DomainError::Validation(format!(
                "live range is inverted: {} > {}",
                self.live_min, self.live_max
            )));
        }
        if !(self.jitter_span.is_finite() && self.jitter_span >= 0.0) {
            return Err(DomainError::Validation(format!(
                "jitter span must be a non-negative number, got {}",
                self.jitter_span
            )));
        }
        Ok(())
    }

    /// Clamps a reading to the live range.
    ///
    /// # Panics
    ///
    /// Panics if `live_min > live_max`. `validate` rejects such configs.
    #[must_use]
    pub fn clamp_live(&self, reading: f64) -> f64 {
        reading.clamp(self.live_min, self.live_max)
    }

    /// Applies one jitter draw to a reading.
    #[must_use]
    pub fn jitter(&self, reading: f64, draw: f64) -> f64 {
        self.clamp_live(reading + (draw - 0.5) * self.jitter_span)
    }
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_millis(2500),
            jitter_span: 1.2,
            next_day_threshold: 0.6,
            live_min: 28.0,
            live_max: 48.0,
        }
    }
}
