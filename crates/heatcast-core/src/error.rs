//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// Forecast generation and heat classification are total and never fail;
/// only lifecycle misuse and infrastructure faults surface here.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A command was issued in a phase that does not accept it, or the
    /// live configuration is unusable.
    #[error("validation error: {0}")]
    Validation(String),

    /// A runtime fault outside the domain logic (poisoned lock, closed inbox).
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
