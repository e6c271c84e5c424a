//! Commands for the live forecast.

use heatcast_core::aggregate::Command;
use uuid::Uuid;

/// Command to generate the first forecast for a location.
#[derive(Debug, Clone)]
pub struct CreateForecast {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Initially selected location; empty means the default.
    pub location: String,
}

impl Command for CreateForecast {
    fn command_type(&self) -> &'static str {
        "forecast.create"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to regenerate the forecast for a newly selected location.
#[derive(Debug, Clone)]
pub struct ChangeLocation {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Newly selected location; empty means the default.
    pub location: String,
}

impl Command for ChangeLocation {
    fn command_type(&self) -> &'static str {
        "forecast.change_location"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to begin live updates.
#[derive(Debug, Clone)]
pub struct StartLiveUpdates {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for StartLiveUpdates {
    fn command_type(&self) -> &'static str {
        "forecast.start_live_updates"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command for one tick of the live loop.
#[derive(Debug, Clone)]
pub struct NudgeReadings {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for NudgeReadings {
    fn command_type(&self) -> &'static str {
        "forecast.nudge_readings"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to end live updates for good.
#[derive(Debug, Clone)]
pub struct StopLiveUpdates {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for StopLiveUpdates {
    fn command_type(&self) -> &'static str {
        "forecast.stop_live_updates"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
