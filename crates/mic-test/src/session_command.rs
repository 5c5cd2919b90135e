use crate::config::MAX_RECORDING_SECONDS;

use serde::Deserialize;

/// Actions sent by the mic-test page over its websocket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionCommand {
    /// Ask for microphone access.
    RequestPermission,
    /// Start the test recording.
    StartRecording {
        /// Auto-stop limit; the configured length when absent.
        #[serde(default)]
        max_seconds: Option<u32>,
    },
    /// Stop the test recording early.
    StopRecording,
    /// Discard the result and return to the recording step.
    Reset,
}

impl SessionCommand {
    /// Parse a command from a websocket text frame.
    pub(crate) fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// Recording length for a start command: the requested value clamped to
/// `1..=MAX_RECORDING_SECONDS`, or `configured` when none was requested.
pub(crate) fn recording_limit(requested: Option<u32>, configured: u32) -> u32 {
    requested
        .unwrap_or(configured)
        .clamp(1, MAX_RECORDING_SECONDS)
}
