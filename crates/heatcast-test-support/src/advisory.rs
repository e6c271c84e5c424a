//! Test advisory sinks.

use std::sync::Mutex;

use async_trait::async_trait;
use heatcast_core::advisory::{AdvisoryError, SpeechSink, TextFallback};

/// A speech sink that accepts every message and records it.
#[derive(Debug, Default)]
pub struct RecordingSpeechSink {
    spoken: Mutex<Vec<String>>,
    cancels: Mutex<usize>,
}

impl RecordingSpeechSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages spoken so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }

    /// How many times `cancel` was called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn cancels(&self) -> usize {
        *self.cancels.lock().unwrap()
    }
}

#[async_trait]
impl SpeechSink for RecordingSpeechSink {
    async fn cancel(&self) {
        *self.cancels.lock().unwrap() += 1;
    }

    async fn speak(&self, message: &str) -> Result<(), AdvisoryError> {
        self.spoken.lock().unwrap().push(message.to_owned());
        Ok(())
    }
}

/// A speech sink for hosts without speech synthesis.
#[derive(Debug)]
pub struct UnavailableSpeechSink;

#[async_trait]
impl SpeechSink for UnavailableSpeechSink {
    async fn cancel(&self) {}

    async fn speak(&self, _message: &str) -> Result<(), AdvisoryError> {
        Err(AdvisoryError::Unavailable)
    }
}

/// A speech sink whose every utterance fails.
#[derive(Debug)]
pub struct FailingSpeechSink;

#[async_trait]
impl SpeechSink for FailingSpeechSink {
    async fn cancel(&self) {}

    async fn speak(&self, _message: &str) -> Result<(), AdvisoryError> {
        Err(AdvisoryError::Failed("audio device busy".into()))
    }
}

/// A textual fallback that records every alert.
#[derive(Debug, Default)]
pub struct RecordingFallback {
    alerts: Mutex<Vec<String>>,
}

impl RecordingFallback {
    /// Create an empty recording fallback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Alerts shown so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl TextFallback for RecordingFallback {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_owned());
    }
}
