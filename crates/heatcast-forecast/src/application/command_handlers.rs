//! Command handlers for the live forecast.
//!
//! Each handler runs the command against the aggregate, drains the events it
//! recorded, and publishes them to the view: a full chart and status update
//! for a generated forecast, today's bar and status for a tick.

use heatcast_core::aggregate::{AggregateRoot, Command};
use heatcast_core::clock::Clock;
use heatcast_core::error::DomainError;
use heatcast_core::event::DomainEvent;
use heatcast_core::rng::DeterministicRng;
use heatcast_core::view::ForecastView;
use tracing::{debug, info};

use crate::domain::aggregates::LiveForecast;
use crate::domain::chart::{current_conditions, day_bar, day_bars};
use crate::domain::commands::{
    ChangeLocation, CreateForecast, NudgeReadings, StartLiveUpdates, StopLiveUpdates,
};
use crate::domain::config::LiveConfig;
use crate::domain::events::{ForecastEvent, ForecastEventKind};

/// Publishes recorded events to the view.
///
/// `rng` supplies the real-feel jitter, one draw per status update.
fn publish(
    forecast: &LiveForecast,
    events: &[ForecastEvent],
    rng: &mut dyn DeterministicRng,
    view: &dyn ForecastView,
) {
    for event in events {
        debug!(
            event_type = event.event_type(),
            sequence_number = event.metadata().sequence_number,
            correlation_id = %event.metadata().correlation_id,
            payload = %event.to_payload(),
            "publishing event"
        );
        match &event.kind {
            ForecastEventKind::ForecastGenerated(payload) => {
                let readings = payload.temperatures.map(f64::from);
                view.render_forecast(&day_bars(payload.date, &readings));
                view.present_current(&current_conditions(
                    &payload.location,
                    readings[0],
                    rng.next_f64(),
                ));
            }
            ForecastEventKind::ReadingsNudged(payload) => {
                view.present_current(&current_conditions(
                    forecast.location(),
                    payload.current,
                    rng.next_f64(),
                ));
                view.update_first_bar(&day_bar(forecast.date(), 0, payload.current));
            }
            ForecastEventKind::LiveUpdatesStarted(_) | ForecastEventKind::LiveUpdatesStopped(_) => {
                debug!(event_type = event.kind.type_name(), "lifecycle event, nothing to draw");
            }
        }
    }
}

/// Handles the `CreateForecast` command: generates the first forecast and
/// draws it.
pub fn handle_create_forecast(
    command: &CreateForecast,
    config: LiveConfig,
    clock: &dyn Clock,
    rng: &mut dyn DeterministicRng,
    view: &dyn ForecastView,
) -> LiveForecast {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        location = %command.location,
        "handling create_forecast command"
    );

    let mut forecast = LiveForecast::create(&command.location, config, command.correlation_id, clock);
    let events = forecast.take_uncommitted_events();
    publish(&forecast, &events, rng, view);
    forecast
}

/// Handles the `ChangeLocation` command: regenerates the forecast for the new
/// location and redraws everything.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the forecast has been disposed.
pub fn handle_change_location(
    command: &ChangeLocation,
    forecast: &mut LiveForecast,
    clock: &dyn Clock,
    rng: &mut dyn DeterministicRng,
    view: &dyn ForecastView,
) -> Result<Vec<ForecastEvent>, DomainError> {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        location = %command.location,
        "handling change_location command"
    );

    forecast.change_location(&command.location, command.correlation_id, clock)?;
    let events = forecast.take_uncommitted_events();
    publish(forecast, &events, rng, view);
    Ok(events)
}

/// Handles the `StartLiveUpdates` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` unless the forecast is idle.
pub fn handle_start_live_updates(
    command: &StartLiveUpdates,
    forecast: &mut LiveForecast,
    clock: &dyn Clock,
) -> Result<Vec<ForecastEvent>, DomainError> {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        "handling start_live_updates command"
    );

    forecast.start(command.correlation_id, clock)?;
    Ok(forecast.take_uncommitted_events())
}

/// Handles the `NudgeReadings` command: applies one tick and redraws today.
///
/// # Errors
///
/// Returns `DomainError::Validation` unless live updates are running.
pub fn handle_nudge_readings(
    command: &NudgeReadings,
    forecast: &mut LiveForecast,
    clock: &dyn Clock,
    rng: &mut dyn DeterministicRng,
    view: &dyn ForecastView,
) -> Result<Vec<ForecastEvent>, DomainError> {
    forecast.tick(command.correlation_id, clock, rng)?;
    let events = forecast.take_uncommitted_events();
    debug!(
        correlation_id = %command.correlation_id(),
        current = forecast.current(),
        "readings nudged"
    );
    publish(forecast, &events, rng, view);
    Ok(events)
}

/// Handles the `StopLiveUpdates` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if already disposed.
pub fn handle_stop_live_updates(
    command: &StopLiveUpdates,
    forecast: &mut LiveForecast,
    clock: &dyn Clock,
) -> Result<Vec<ForecastEvent>, DomainError> {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        "handling stop_live_updates command"
    );

    forecast.dispose(command.correlation_id, clock)?;
    Ok(forecast.take_uncommitted_events())
}
