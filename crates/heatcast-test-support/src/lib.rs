//! Shared test mocks and utilities for the Heatcast forecast engine.

mod advisory;
mod clock;
mod rng;
mod view;

pub use advisory::{FailingSpeechSink, RecordingFallback, RecordingSpeechSink, UnavailableSpeechSink};
pub use clock::FixedClock;
pub use rng::{MockRng, SequenceRng};
pub use view::RecordingView;
