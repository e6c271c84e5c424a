//! The interactive loop reading commands from the terminal.

use std::future::Future;
use std::io;

use heatcast_core::advisory::{SpeechSink, TextFallback};
use heatcast_forecast::application::advisory::{advisory_for, deliver_advisory};
use heatcast_forecast::application::live_loop::LiveForecastHandle;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::error::AppError;
use crate::input::{Input, parse_input};

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed `:quit`.
    Quit,
    /// The shutdown signal fired.
    Interrupted,
}

/// Feeds lines from `input` to the live forecast until the user quits or
/// `shutdown` resolves.
///
/// Closed input does not end the session: the forecast keeps ticking until
/// `shutdown`. The caller still owns `handle` and must stop it.
///
/// # Errors
///
/// Returns `AppError::Io` if reading input or waiting for the shutdown
/// signal fails, and `AppError::Domain` if the live task has exited.
pub async fn run_session<R, S>(
    handle: &LiveForecastHandle,
    input: R,
    speech: &dyn SpeechSink,
    fallback: &dyn TextFallback,
    shutdown: S,
) -> Result<SessionEnd, AppError>
where
    R: AsyncBufRead + Unpin,
    S: Future<Output = io::Result<()>>,
{
    let mut lines = input.lines();
    let mut input_open = true;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            signal = &mut shutdown => {
                signal?;
                info!("Interrupted");
                return Ok(SessionEnd::Interrupted);
            }
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    debug!("input closed, waiting for shutdown");
                    input_open = false;
                    continue;
                };
                match parse_input(&line) {
                    Input::ChangeLocation(location) => handle.change_location(location).await?,
                    Input::Listen => {
                        let message = advisory_for(&handle.snapshot().await?);
                        deliver_advisory(speech, fallback, &message).await;
                    }
                    Input::Quit => return Ok(SessionEnd::Quit),
                    Input::Blank => {}
                }
            }
        }
    }
}
