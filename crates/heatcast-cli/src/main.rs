//! Heatcast terminal entry point.

use std::error::Error;
use std::sync::Arc;

use heatcast_cli::config::AppConfig;
use heatcast_cli::error::AppError;
use heatcast_cli::session::run_session;
use heatcast_cli::telemetry;
use heatcast_cli::terminal::{ConsoleAlert, NoSpeech, TerminalView};
use heatcast_core::clock::SystemClock;
use heatcast_core::rng::EntropyRng;
use heatcast_forecast::application::live_loop::spawn_live_forecast;
use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    run().await?;
    Ok(())
}

async fn run() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    telemetry::init(config.log_format);

    info!(
        location = %config.location,
        tick_ms = config.live.tick_period.as_millis(),
        "Starting Heatcast"
    );

    let handle = spawn_live_forecast(
        &config.location,
        config.live,
        Arc::new(SystemClock),
        Box::new(EntropyRng::from_os()),
        Arc::new(TerminalView::stdout()),
    )?;

    let outcome = run_session(
        &handle,
        BufReader::new(tokio::io::stdin()),
        &NoSpeech,
        &ConsoleAlert,
        tokio::signal::ctrl_c(),
    )
    .await;

    let last = handle.stop().await?;
    let end = outcome?;
    info!(?end, location = %last.location, current = last.current(), "Heatcast stopped");

    Ok(())
}
