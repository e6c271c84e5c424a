//! Reading the advisory aloud, with a textual fallback.

use heatcast_core::advisory::{SpeechSink, TextFallback};
use tracing::{instrument, warn};

use crate::application::live_loop::LiveSnapshot;
use crate::domain::chart::temperature_text;
use crate::domain::status::classify;

/// Which channel delivered an advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryChannel {
    /// Spoken through the speech sink.
    Speech,
    /// Shown through the textual fallback.
    Fallback,
}

/// Formats the advisory line.
#[must_use]
pub fn advisory_message(location: &str, current_text: &str, advice: &str) -> String {
    format!("Advisory for {location}: Current {current_text}. {advice}")
}

/// Advisory line for a live snapshot.
#[must_use]
pub fn advisory_for(snapshot: &LiveSnapshot) -> String {
    let current = snapshot.current();
    advisory_message(
        &snapshot.location,
        &temperature_text(current),
        classify(current).advice,
    )
}

/// Speaks `message`, cancelling any utterance in progress first. Falls back
/// to text when speech is unavailable or fails.
#[instrument(skip(speech, fallback))]
pub async fn deliver_advisory(
    speech: &dyn SpeechSink,
    fallback: &dyn TextFallback,
    message: &str,
) -> AdvisoryChannel {
    speech.cancel().await;
    match speech.speak(message).await {
        Ok(()) => AdvisoryChannel::Speech,
        Err(e) => {
            warn!(error = %e, "speech unavailable, falling back to text");
            fallback.alert(message);
            AdvisoryChannel::Fallback
        }
    }
}
