//! The live update task.
//!
//! One tokio task owns the forecast and is its only mutator. Ticks come from
//! an interval timer; location changes, snapshots, and shutdown arrive through
//! an inbox. Messages are handled one at a time, so no two updates overlap.

use std::sync::Arc;

use heatcast_core::clock::Clock;
use heatcast_core::error::DomainError;
use heatcast_core::rng::DeterministicRng;
use heatcast_core::view::ForecastView;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::application::command_handlers::{
    handle_change_location, handle_create_forecast, handle_nudge_readings,
    handle_start_live_updates, handle_stop_live_updates,
};
use crate::domain::aggregates::LiveForecast;
use crate::domain::commands::{
    ChangeLocation, CreateForecast, NudgeReadings, StartLiveUpdates, StopLiveUpdates,
};
use crate::domain::config::LiveConfig;
use crate::domain::generator::FORECAST_DAYS;

const INBOX_CAPACITY: usize = 32;

/// Point-in-time copy of the live forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveSnapshot {
    /// Location the readings belong to.
    pub location: String,
    /// Readings, today first.
    pub readings: [f64; FORECAST_DAYS],
}

impl LiveSnapshot {
    fn of(forecast: &LiveForecast) -> Self {
        Self {
            location: forecast.location().to_owned(),
            readings: *forecast.readings(),
        }
    }

    /// Today's reading.
    #[must_use]
    pub fn current(&self) -> f64 {
        self.readings[0]
    }
}

/// Messages accepted by the live task.
#[derive(Debug)]
pub enum LiveMessage {
    /// Apply one perturbation now.
    Tick,
    /// Regenerate for a new location.
    LocationChanged(String),
    /// Reply with the current readings.
    Snapshot(oneshot::Sender<LiveSnapshot>),
    /// Dispose and exit.
    Stop,
}

/// Handle to a running live forecast task.
#[derive(Debug)]
pub struct LiveForecastHandle {
    sender: mpsc::Sender<LiveMessage>,
    task: JoinHandle<Result<LiveSnapshot, DomainError>>,
}

impl LiveForecastHandle {
    /// Selects a new location.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the task has exited.
    pub async fn change_location(&self, location: impl Into<String>) -> Result<(), DomainError> {
        self.send(LiveMessage::LocationChanged(location.into())).await
    }

    /// Applies one tick immediately, independent of the timer.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the task has exited.
    pub async fn tick_now(&self) -> Result<(), DomainError> {
        self.send(LiveMessage::Tick).await
    }

    /// Returns the current location and readings.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the task has exited.
    pub async fn snapshot(&self) -> Result<LiveSnapshot, DomainError> {
        let (reply, response) = oneshot::channel();
        self.send(LiveMessage::Snapshot(reply)).await?;
        response
            .await
            .map_err(|e| DomainError::Infrastructure(format!("snapshot reply dropped: {e}")))
    }

    /// Stops the timer, disposes the forecast, and waits for the task to
    /// finish. Returns the readings at shutdown.
    ///
    /// # Errors
    ///
    /// Returns the task's error if it failed, or `DomainError::Infrastructure`
    /// if it panicked.
    pub async fn stop(self) -> Result<LiveSnapshot, DomainError> {
        if self.sender.send(LiveMessage::Stop).await.is_err() {
            warn!("live forecast task already exited before stop");
        }
        self.task
            .await
            .map_err(|e| DomainError::Infrastructure(format!("live forecast task failed: {e}")))?
    }

    async fn send(&self, message: LiveMessage) -> Result<(), DomainError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| DomainError::Infrastructure("live forecast task has stopped".to_owned()))
    }
}

/// Generates the forecast for `location`, draws it, starts live updates, and
/// spawns the task that keeps them going.
///
/// The first timer tick fires one `tick_period` after spawning. Must be
/// called from within a tokio runtime.
///
/// # Errors
///
/// Returns `DomainError::Validation` if `config` fails
/// [`LiveConfig::validate`] or live updates cannot start. Nothing is drawn
/// when the config is rejected.
#[instrument(skip(config, clock, rng, view))]
pub fn spawn_live_forecast(
    location: &str,
    config: LiveConfig,
    clock: Arc<dyn Clock>,
    mut rng: Box<dyn DeterministicRng>,
    view: Arc<dyn ForecastView>,
) -> Result<LiveForecastHandle, DomainError> {
    config.validate()?;

    let create = CreateForecast {
        correlation_id: Uuid::new_v4(),
        location: location.to_owned(),
    };
    let mut forecast =
        handle_create_forecast(&create, config, clock.as_ref(), rng.as_mut(), view.as_ref());

    let start = StartLiveUpdates {
        correlation_id: create.correlation_id,
    };
    handle_start_live_updates(&start, &mut forecast, clock.as_ref())?;

    let (sender, inbox) = mpsc::channel(INBOX_CAPACITY);
    let task = tokio::spawn(run(forecast, inbox, clock, rng, view));
    info!(location = %location, "live forecast started");

    Ok(LiveForecastHandle { sender, task })
}

async fn run(
    mut forecast: LiveForecast,
    mut inbox: mpsc::Receiver<LiveMessage>,
    clock: Arc<dyn Clock>,
    mut rng: Box<dyn DeterministicRng>,
    view: Arc<dyn ForecastView>,
) -> Result<LiveSnapshot, DomainError> {
    let period = forecast.config().tick_period;
    let mut timer = tokio::time::interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let message = tokio::select! {
            _ = timer.tick() => LiveMessage::Tick,
            received = inbox.recv() => received.unwrap_or_else(|| {
                warn!("live forecast inbox closed, stopping");
                LiveMessage::Stop
            }),
        };

        match message {
            LiveMessage::Tick => {
                let command = NudgeReadings {
                    correlation_id: Uuid::new_v4(),
                };
                handle_nudge_readings(
                    &command,
                    &mut forecast,
                    clock.as_ref(),
                    rng.as_mut(),
                    view.as_ref(),
                )?;
            }
            LiveMessage::LocationChanged(location) => {
                let command = ChangeLocation {
                    correlation_id: Uuid::new_v4(),
                    location,
                };
                handle_change_location(
                    &command,
                    &mut forecast,
                    clock.as_ref(),
                    rng.as_mut(),
                    view.as_ref(),
                )?;
            }
            LiveMessage::Snapshot(reply) => {
                if reply.send(LiveSnapshot::of(&forecast)).is_err() {
                    warn!("snapshot requester went away");
                }
            }
            LiveMessage::Stop => {
                let command = StopLiveUpdates {
                    correlation_id: Uuid::new_v4(),
                };
                handle_stop_live_updates(&command, &mut forecast, clock.as_ref())?;
                info!(location = %forecast.location(), "live forecast stopped");
                return Ok(LiveSnapshot::of(&forecast));
            }
        }
    }
}
