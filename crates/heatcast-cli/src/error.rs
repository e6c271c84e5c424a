//! Heatcast CLI — error types.

use heatcast_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the terminal front end.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The live forecast rejected a command or its task failed.
    #[error("forecast error: {0}")]
    Domain(#[from] DomainError),

    /// Reading the terminal failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_converts_and_keeps_message() {
        let err: AppError = DomainError::Infrastructure("inbox closed".into()).into();
        assert_eq!(
            err.to_string(),
            "forecast error: infrastructure error: inbox closed"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let err: AppError = std::io::Error::other("stdin gone").into();
        assert!(matches!(err, AppError::Io(_)));
    }
}
