//! Text rendering of the forecast chart and status panel.

use std::io::{self, Stdout, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use heatcast_core::advisory::{AdvisoryError, SpeechSink, TextFallback};
use heatcast_core::view::{CurrentConditions, DayBar, ForecastRenderer, StatusPresenter};
use tracing::warn;

/// Width of a full bar in cells.
const BAR_CELLS: usize = 20;

/// Draws one chart row, e.g. `Thu   37°C |#########...........| normal`.
#[must_use]
pub fn format_bar(bar: &DayBar) -> String {
    let filled = usize::from(bar.height_percent) * BAR_CELLS / 100;
    format!(
        "{:<4} {:>5} |{}{}| {}",
        bar.label,
        bar.text,
        "#".repeat(filled),
        ".".repeat(BAR_CELLS - filled),
        bar.level
    )
}

/// Draws the status line.
#[must_use]
pub fn format_conditions(conditions: &CurrentConditions) -> String {
    let mut line = format!(
        "{}: now {} (feels {}) [{}]",
        conditions.location, conditions.text, conditions.real_feel_text, conditions.level
    );
    if !conditions.advice.is_empty() {
        line.push(' ');
        line.push_str(conditions.advice);
    }
    line
}

/// Renderer and presenter writing plain text lines.
#[derive(Debug)]
pub struct TerminalView<W> {
    out: Mutex<W>,
}

impl TerminalView<Stdout> {
    /// A view writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalView<W> {
    /// A view writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Returns the writer.
    ///
    /// # Errors
    ///
    /// Returns the poison error if a writer thread panicked.
    pub fn into_inner(self) -> Result<W, std::sync::PoisonError<W>> {
        self.out.into_inner()
    }

    fn write_lines<I>(&self, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        let Ok(mut out) = self.out.lock() else {
            warn!("terminal writer lock poisoned, dropping output");
            return;
        };
        let result = lines
            .into_iter()
            .try_for_each(|line| writeln!(out, "{line}"))
            .and_then(|()| out.flush());
        if let Err(e) = result {
            warn!(error = %e, "failed to write to terminal");
        }
    }
}

impl<W: Write + Send> ForecastRenderer for TerminalView<W> {
    fn render_forecast(&self, bars: &[DayBar]) {
        let header = format!("--- {}-day forecast ---", bars.len());
        self.write_lines(std::iter::once(header).chain(bars.iter().map(format_bar)));
    }

    fn update_first_bar(&self, bar: &DayBar) {
        self.write_lines([format_bar(bar)]);
    }
}

impl<W: Write + Send> StatusPresenter for TerminalView<W> {
    fn present_current(&self, conditions: &CurrentConditions) {
        self.write_lines([format_conditions(conditions)]);
    }
}

/// Terminals have no speech synthesis.
#[derive(Debug, Clone, Copy)]
pub struct NoSpeech;

#[async_trait]
impl SpeechSink for NoSpeech {
    async fn cancel(&self) {}

    async fn speak(&self, _message: &str) -> Result<(), AdvisoryError> {
        Err(AdvisoryError::Unavailable)
    }
}

/// Prints advisories to standard output.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleAlert;

impl TextFallback for ConsoleAlert {
    fn alert(&self, message: &str) {
        let mut out = io::stdout().lock();
        if let Err(e) = writeln!(out, "[advisory] {message}") {
            warn!(error = %e, "failed to print advisory");
        }
    }
}
