//! Domain events for the live forecast.

use chrono::NaiveDate;
use heatcast_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

use super::generator::FORECAST_DAYS;

/// Emitted when a forecast is generated for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastGenerated {
    /// Location the forecast was seeded with.
    pub location: String,
    /// Calendar day of the first reading.
    pub date: NaiveDate,
    /// Whole-degree readings, today first.
    pub temperatures: [i32; FORECAST_DAYS],
}

/// Emitted when the live loop starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveUpdatesStarted {
    /// Tick period in milliseconds.
    pub tick_period_ms: u64,
}

/// Emitted on every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingsNudged {
    /// Today's reading after the nudge.
    pub current: f64,
    /// Tomorrow's reading, when it was nudged too.
    pub next_day: Option<f64>,
}

/// Emitted when the live loop is disposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveUpdatesStopped {
    /// Today's reading at shutdown.
    pub final_reading: f64,
}

/// Event payload variants for the live forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ForecastEventKind {
    /// A forecast was generated.
    ForecastGenerated(ForecastGenerated),
    /// The live loop started.
    LiveUpdatesStarted(LiveUpdatesStarted),
    /// A tick nudged the readings.
    ReadingsNudged(ReadingsNudged),
    /// The live loop stopped.
    LiveUpdatesStopped(LiveUpdatesStopped),
}

impl ForecastEventKind {
    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Self::ForecastGenerated(_) => "forecast.generated",
            Self::LiveUpdatesStarted(_) => "forecast.live_updates_started",
            Self::ReadingsNudged(_) => "forecast.readings_nudged",
            Self::LiveUpdatesStopped(_) => "forecast.live_updates_stopped",
        }
    }
}

/// Domain event envelope for the live forecast.
#[derive(Debug, Clone)]
pub struct ForecastEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: ForecastEventKind,
}

impl DomainEvent for ForecastEvent {
    fn event_type(&self) -> &'static str {
        self.kind.type_name()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("ForecastEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
