//! Spoken advisory abstraction.

use async_trait::async_trait;
use thiserror::Error;

/// Failure to read an advisory aloud.
#[derive(Debug, Error)]
pub enum AdvisoryError {
    /// The host has no speech synthesis.
    #[error("speech synthesis unavailable")]
    Unavailable,

    /// Speech synthesis exists but rejected the utterance.
    #[error("speech synthesis failed: {0}")]
    Failed(String),
}

/// Speech output for advisories.
#[async_trait]
pub trait SpeechSink: Send + Sync {
    /// Stops any utterance in progress.
    async fn cancel(&self);

    /// Reads `message` aloud.
    async fn speak(&self, message: &str) -> Result<(), AdvisoryError>;
}

/// Textual fallback when speech is not available.
pub trait TextFallback: Send + Sync {
    /// Shows `message` to the user.
    fn alert(&self, message: &str);
}
