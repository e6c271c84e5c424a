//! Environment configuration.

use std::time::Duration;

use heatcast_forecast::domain::config::LiveConfig;
use heatcast_forecast::domain::generator::DEFAULT_LOCATION;

use crate::error::AppError;

/// Initial location.
pub const LOCATION_VAR: &str = "HEATCAST_LOCATION";
/// Tick period in milliseconds.
pub const TICK_MS_VAR: &str = "HEATCAST_TICK_MS";
/// `json` or `text`.
pub const LOG_FORMAT_VAR: &str = "HEATCAST_LOG_FORMAT";

/// Shape of log lines on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// Human-readable text.
    Text,
}

/// Settings for one run of the terminal front end.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Location shown at startup.
    pub location: String,
    /// Live loop tuning.
    pub live: LiveConfig,
    /// Log line format.
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns the value of a
    /// variable if set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let location = lookup(LOCATION_VAR)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_LOCATION.to_owned());

        let live = match lookup(TICK_MS_VAR) {
            Some(value) => LiveConfig::with_tick_period(parse_tick_period(&value)?),
            None => LiveConfig::default(),
        };

        let log_format = match lookup(LOG_FORMAT_VAR).as_deref().map(str::trim) {
            None | Some("json") => LogFormat::Json,
            Some("text") => LogFormat::Text,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "{LOG_FORMAT_VAR} must be `json` or `text`, got `{other}`"
                )));
            }
        };

        Ok(Self {
            location,
            live,
            log_format,
        })
    }
}

fn parse_tick_period(value: &str) -> Result<Duration, AppError> {
    match value.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(AppError::Config(format!(
            "{TICK_MS_VAR} must be a positive integer, got `{value}`"
        ))),
        Ok(millis) => Ok(Duration::from_millis(millis)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.location, "Jalgaon");
        assert_eq!(config.live, LiveConfig::default());
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_blank_location_uses_default() {
        let config = AppConfig::from_lookup(lookup(&[(LOCATION_VAR, "   ")])).unwrap();
        assert_eq!(config.location, "Jalgaon");
    }

    #[test]
    fn test_tick_period_zero_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(TICK_MS_VAR, "0")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration error: HEATCAST_TICK_MS must be a positive integer, got `0`"
        );
    }

    #[test]
    fn test_non_numeric_tick_period_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(TICK_MS_VAR, "fast")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration error: HEATCAST_TICK_MS must be a positive integer, got `fast`"
        );
    }

    #[test]
    fn test_tick_period_sets_only_the_period() {
        let config = AppConfig::from_lookup(lookup(&[(TICK_MS_VAR, " 750 ")])).unwrap();
        assert_eq!(config.live.tick_period, Duration::from_millis(750));
        assert_eq!(
            config.live,
            LiveConfig::with_tick_period(Duration::from_millis(750))
        );
    }

    #[test]
    fn test_text_log_format_and_location() {
        let config = AppConfig::from_lookup(lookup(&[
            (LOG_FORMAT_VAR, "text"),
            (LOCATION_VAR, " Pune "),
        ]))
        .unwrap();
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.location, "Pune");
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
