//! Aggregate root for the live forecast.

use chrono::NaiveDate;
use heatcast_core::aggregate::AggregateRoot;
use heatcast_core::clock::Clock;
use heatcast_core::error::DomainError;
use heatcast_core::event::EventMetadata;
use heatcast_core::rng::DeterministicRng;
use uuid::Uuid;

use super::config::LiveConfig;
use super::events::{
    ForecastEvent, ForecastEventKind, ForecastGenerated, LiveUpdatesStarted, LiveUpdatesStopped,
    ReadingsNudged,
};
use super::generator::{FORECAST_DAYS, generate_forecast};

/// Lifecycle of the live loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LivePhase {
    Idle,
    Running,
    Disposed,
}

/// The in-memory forecast and its live readings.
///
/// Readings start as the generated whole-degree series and drift with each
/// tick; index 0 is today and the only one besides tomorrow that ever moves.
#[derive(Debug)]
pub struct LiveForecast {
    pub(crate) location: String,
    pub(crate) date: NaiveDate,
    pub(crate) readings: [f64; FORECAST_DAYS],
    pub(crate) phase: LivePhase,
    config: LiveConfig,
    version: i64,
    uncommitted_events: Vec<ForecastEvent>,
}

impl LiveForecast {
    /// Generates the first forecast for `location` on the clock's current day.
    #[must_use]
    pub fn create(
        location: &str,
        config: LiveConfig,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Self {
        let mut forecast = Self {
            location: String::new(),
            date: clock.today(),
            readings: [0.0; FORECAST_DAYS],
            phase: LivePhase::Idle,
            config,
            version: 0,
            uncommitted_events: Vec::new(),
        };
        forecast.regenerate(location, correlation_id, clock);
        forecast
    }

    /// Location the current forecast was generated for.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Calendar day of `readings()[0]`.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Current readings, today first.
    #[must_use]
    pub fn readings(&self) -> &[f64; FORECAST_DAYS] {
        &self.readings
    }

    /// Today's reading.
    #[must_use]
    pub fn current(&self) -> f64 {
        self.readings[0]
    }

    /// Loop tuning.
    #[must_use]
    pub fn config(&self) -> &LiveConfig {
        &self.config
    }

    /// Whether ticks are being accepted.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == LivePhase::Running
    }

    /// Whether the forecast has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.phase == LivePhase::Disposed
    }

    /// Replaces the whole forecast with one generated for `location`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` after disposal.
    pub fn change_location(
        &mut self,
        location: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.ensure_not_disposed()?;
        self.regenerate(location, correlation_id, clock);
        Ok(())
    }

    /// Starts accepting ticks.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless in the `Idle` phase.
    pub fn start(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        if self.phase != LivePhase::Idle {
            return Err(DomainError::Validation(
                "live updates can only start from Idle".to_owned(),
            ));
        }

        let tick_period_ms =
            u64::try_from(self.config.tick_period.as_millis()).unwrap_or(u64::MAX);
        self.record(
            ForecastEventKind::LiveUpdatesStarted(LiveUpdatesStarted { tick_period_ms }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Nudges today's reading, and on some ticks tomorrow's, by a bounded
    /// amount drawn from `rng`.
    ///
    /// Draw order: today's jitter, the tomorrow gate, then tomorrow's jitter
    /// only when the gate opens.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless in the `Running` phase.
    pub fn tick(
        &mut self,
        correlation_id: Uuid,
        clock: &dyn Clock,
        rng: &mut dyn DeterministicRng,
    ) -> Result<(), DomainError> {
        if self.phase != LivePhase::Running {
            return Err(DomainError::Validation(
                "live updates must be running to tick".to_owned(),
            ));
        }

        let current = self.config.jitter(self.readings[0], rng.next_f64());
        let next_day = (rng.next_f64() > self.config.next_day_threshold)
            .then(|| self.config.jitter(self.readings[1], rng.next_f64()));

        self.record(
            ForecastEventKind::ReadingsNudged(ReadingsNudged { current, next_day }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Stops live updates for good.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if already disposed.
    pub fn dispose(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        self.ensure_not_disposed()?;
        self.record(
            ForecastEventKind::LiveUpdatesStopped(LiveUpdatesStopped {
                final_reading: self.readings[0],
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    fn ensure_not_disposed(&self) -> Result<(), DomainError> {
        if self.phase == LivePhase::Disposed {
            return Err(DomainError::Validation(
                "live forecast has been disposed".to_owned(),
            ));
        }
        Ok(())
    }

    fn regenerate(&mut self, location: &str, correlation_id: Uuid, clock: &dyn Clock) {
        let forecast = generate_forecast(location, clock.today());
        self.record(
            ForecastEventKind::ForecastGenerated(ForecastGenerated {
                location: forecast.location,
                date: forecast.date,
                temperatures: forecast.temperatures,
            }),
            correlation_id,
            clock,
        );
    }

    /// Returns the next sequence number for a new event.
    fn next_sequence_number(&self) -> i64 {
        self.version + 1
    }

    fn record(&mut self, kind: ForecastEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let event = ForecastEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.type_name().to_owned(),
                sequence_number: self.next_sequence_number(),
                correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };
        self.apply(&event);
        self.uncommitted_events.push(event);
    }
}

impl AggregateRoot for LiveForecast {
    type Event = ForecastEvent;

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            ForecastEventKind::ForecastGenerated(payload) => {
                self.location.clone_from(&payload.location);
                self.date = payload.date;
                self.readings = payload.temperatures.map(f64::from);
            }
            ForecastEventKind::LiveUpdatesStarted(_) => {
                self.phase = LivePhase::Running;
            }
            ForecastEventKind::ReadingsNudged(payload) => {
                self.readings[0] = payload.current;
                if let Some(next_day) = payload.next_day {
                    self.readings[1] = next_day;
                }
            }
            ForecastEventKind::LiveUpdatesStopped(_) => {
                self.phase = LivePhase::Disposed;
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.uncommitted_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatcast_core::event::DomainEvent;
    use heatcast_test_support::{FixedClock, MockRng, SequenceRng};

    const JALGAON_JAN_15: [i32; FORECAST_DAYS] =
        [37, 35, 36, 36, 37, 36, 35, 36, 36, 34, 33, 34, 34, 37, 36];
    const PUNE_JAN_15: [i32; FORECAST_DAYS] =
        [41, 44, 44, 44, 42, 44, 41, 42, 40, 43, 41, 42, 41, 40, 41];

    fn fixed_clock() -> FixedClock {
        FixedClock::on(2026, 1, 15)
    }

    fn running(location: &str) -> LiveForecast {
        let clock = fixed_clock();
        let mut forecast =
            LiveForecast::create(location, LiveConfig::default(), Uuid::new_v4(), &clock);
        forecast.start(Uuid::new_v4(), &clock).unwrap();
        forecast.take_uncommitted_events();
        forecast
    }

    // --- create ---

    #[test]
    fn test_create_generates_forecast_in_idle_phase() {
        let correlation_id = Uuid::new_v4();
        let clock = fixed_clock();

        let forecast =
            LiveForecast::create("Jalgaon", LiveConfig::default(), correlation_id, &clock);

        assert_eq!(forecast.phase, LivePhase::Idle);
        assert_eq!(forecast.location(), "Jalgaon");
        assert_eq!(forecast.date(), clock.today());
        assert_eq!(*forecast.readings(), JALGAON_JAN_15.map(f64::from));
        assert_eq!(forecast.version(), 1);

        let events = forecast.uncommitted_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "forecast.generated");
        assert_eq!(events[0].metadata().sequence_number, 1);
        assert_eq!(events[0].metadata().correlation_id, correlation_id);
        assert_eq!(events[0].metadata().occurred_at, clock.0);
    }

    #[test]
    fn test_create_with_empty_location_uses_default() {
        let forecast =
            LiveForecast::create("", LiveConfig::default(), Uuid::new_v4(), &fixed_clock());
        assert_eq!(forecast.location(), "Jalgaon");
    }

    // --- start ---

    #[test]
    fn test_start_moves_to_running() {
        let clock = fixed_clock();
        let mut forecast =
            LiveForecast::create("Jalgaon", LiveConfig::default(), Uuid::new_v4(), &clock);

        forecast.start(Uuid::new_v4(), &clock).unwrap();

        assert!(forecast.is_running());
        let events = forecast.uncommitted_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].event_type(), "forecast.live_updates_started");
        assert_eq!(events[1].metadata().sequence_number, 2);
        match &events[1].kind {
            ForecastEventKind::LiveUpdatesStarted(payload) => {
                assert_eq!(payload.tick_period_ms, 2500);
            }
            other => panic!("expected LiveUpdatesStarted, got {other:?}"),
        }
    }

    #[test]
    fn test_start_twice_returns_error() {
        let mut forecast = running("Jalgaon");

        let result = forecast.start(Uuid::new_v4(), &fixed_clock());

        match result.unwrap_err() {
            DomainError::Validation(msg) => {
                assert_eq!(msg, "live updates can only start from Idle");
            }
            other @ DomainError::Infrastructure(_) => panic!("expected Validation, got {other:?}"),
        }
    }

    // --- tick ---

    #[test]
    fn test_tick_in_idle_phase_returns_error() {
        let clock = fixed_clock();
        let mut forecast =
            LiveForecast::create("Jalgaon", LiveConfig::default(), Uuid::new_v4(), &clock);

        let result = forecast.tick(Uuid::new_v4(), &clock, &mut MockRng);

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(forecast.uncommitted_events().len(), 1);
    }

    #[test]
    fn test_tick_nudges_only_today_when_gate_stays_closed() {
        let mut forecast = running("Jalgaon");
        let mut rng = SequenceRng::new(vec![0.75, 0.6]);

        forecast.tick(Uuid::new_v4(), &fixed_clock(), &mut rng).unwrap();

        assert!((forecast.current() - 37.3).abs() < 1e-9);
        assert!((forecast.readings()[1] - 35.0).abs() < f64::EPSILON);
        assert_eq!(rng.draws(), 2);
        let events = forecast.take_uncommitted_events();
        assert_eq!(
            events[0].kind,
            ForecastEventKind::ReadingsNudged(ReadingsNudged {
                current: forecast.current(),
                next_day: None,
            })
        );
    }

    #[test]
    fn test_tick_nudges_tomorrow_when_gate_opens() {
        let mut forecast = running("Jalgaon");
        let mut rng = SequenceRng::new(vec![0.25, 0.61, 0.0]);

        forecast.tick(Uuid::new_v4(), &fixed_clock(), &mut rng).unwrap();

        assert!((forecast.current() - 36.7).abs() < 1e-9);
        assert!((forecast.readings()[1] - 34.4).abs() < 1e-9);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn test_tick_never_touches_later_days() {
        let mut forecast = running("Jalgaon");
        let mut rng = SequenceRng::new(vec![0.99, 0.99, 0.99]);

        for _ in 0..200 {
            forecast.tick(Uuid::new_v4(), &fixed_clock(), &mut rng).unwrap();
        }

        assert_eq!(forecast.readings()[2..], JALGAON_JAN_15.map(f64::from)[2..]);
    }

    #[test]
    fn test_tick_saturates_at_live_bounds() {
        let mut forecast = running("Pune");
        let mut high = SequenceRng::new(vec![0.99]);
        for _ in 0..100 {
            forecast.tick(Uuid::new_v4(), &fixed_clock(), &mut high).unwrap();
        }
        assert!((forecast.current() - 48.0).abs() < f64::EPSILON);
        assert!((forecast.readings()[1] - 48.0).abs() < f64::EPSILON);

        let mut low = SequenceRng::new(vec![0.0]);
        for _ in 0..100 {
            forecast.tick(Uuid::new_v4(), &fixed_clock(), &mut low).unwrap();
        }
        assert!((forecast.current() - 28.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_tick_moves_today_by_at_most_point_six() {
        let mut forecast = running("Jalgaon");
        let mut rng = heatcast_core::rng::EntropyRng::from_u64(42);

        for _ in 0..1_000 {
            let before = forecast.current();
            forecast.tick(Uuid::new_v4(), &fixed_clock(), &mut rng).unwrap();
            let after = forecast.current();
            assert!((after - before).abs() <= 0.6 + 1e-12);
            assert!((28.0..=48.0).contains(&after));
        }
    }

    // --- change_location ---

    #[test]
    fn test_change_location_replaces_whole_series() {
        let mut forecast = running("Jalgaon");
        let mut rng = SequenceRng::new(vec![0.9, 0.9, 0.9]);
        forecast.tick(Uuid::new_v4(), &fixed_clock(), &mut rng).unwrap();

        forecast
            .change_location("Pune", Uuid::new_v4(), &fixed_clock())
            .unwrap();

        assert_eq!(forecast.location(), "Pune");
        assert_eq!(*forecast.readings(), PUNE_JAN_15.map(f64::from));
        assert!(forecast.is_running());
    }

    #[test]
    fn test_change_location_back_restores_original_series() {
        let mut forecast = running("Jalgaon");
        forecast
            .change_location("Pune", Uuid::new_v4(), &fixed_clock())
            .unwrap();
        forecast
            .change_location("Jalgaon", Uuid::new_v4(), &fixed_clock())
            .unwrap();

        assert_eq!(*forecast.readings(), JALGAON_JAN_15.map(f64::from));
    }

    #[test]
    fn test_change_location_uses_clock_day() {
        let mut forecast = running("Jalgaon");

        forecast
            .change_location("TestLoc", Uuid::new_v4(), &FixedClock::on(2024, 1, 1))
            .unwrap();

        assert_eq!(forecast.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(
            *forecast.readings(),
            [38, 39, 40, 39, 41, 40, 37, 38, 40, 38, 40, 39, 37, 38, 39].map(f64::from)
        );
    }

    // --- dispose ---

    #[test]
    fn test_dispose_blocks_further_commands() {
        let mut forecast = running("Jalgaon");
        let clock = fixed_clock();

        forecast.dispose(Uuid::new_v4(), &clock).unwrap();

        assert!(forecast.is_disposed());
        assert!(forecast.tick(Uuid::new_v4(), &clock, &mut MockRng).is_err());
        assert!(
            forecast
                .change_location("Pune", Uuid::new_v4(), &clock)
                .is_err()
        );
        assert!(forecast.start(Uuid::new_v4(), &clock).is_err());
        assert!(forecast.dispose(Uuid::new_v4(), &clock).is_err());
    }

    #[test]
    fn test_dispose_from_idle_is_allowed() {
        let clock = fixed_clock();
        let mut forecast =
            LiveForecast::create("Jalgaon", LiveConfig::default(), Uuid::new_v4(), &clock);

        forecast.dispose(Uuid::new_v4(), &clock).unwrap();

        let events = forecast.take_uncommitted_events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1].kind,
            ForecastEventKind::LiveUpdatesStopped(LiveUpdatesStopped {
                final_reading: 37.0
            })
        );
    }

    // --- apply ---

    #[test]
    fn test_take_uncommitted_events_drains_queue() {
        let mut forecast = running("Jalgaon");
        forecast
            .tick(Uuid::new_v4(), &fixed_clock(), &mut MockRng)
            .unwrap();

        assert_eq!(forecast.take_uncommitted_events().len(), 1);
        assert!(forecast.uncommitted_events().is_empty());
        assert_eq!(forecast.version(), 3);
    }

    #[test]
    fn test_mock_rng_tick_leaves_readings_unchanged() {
        let mut forecast = running("Jalgaon");
        forecast
            .tick(Uuid::new_v4(), &fixed_clock(), &mut MockRng)
            .unwrap();
        assert_eq!(*forecast.readings(), JALGAON_JAN_15.map(f64::from));
    }
}
