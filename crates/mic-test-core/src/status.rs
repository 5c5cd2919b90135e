//! Published state of a microphone test.

use serde::Serialize;

/// Progress of the microphone permission request.
///
/// Moves forward only within a session: a grant is never revoked by the
/// coordinator, and a denial or error only changes on a new request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    /// No request has been made yet.
    #[default]
    NotStarted,
    /// A request is in flight.
    Requesting,
    /// An input stream is open.
    Granted,
    /// The user or OS refused access.
    Denied,
    /// Access failed for any other reason.
    Error,
}

/// Progress of the test recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordingStatus {
    /// Nothing recorded, or the last result was discarded.
    #[default]
    Idle,
    /// Capturing audio, timer running.
    Recording,
    /// A clip was produced.
    Finished,
}

/// Failures surfaced to the user. None of these end the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MicTestFault {
    /// The host exposes no audio input capability at all.
    MediaInputUnsupported,
    /// Microphone access was refused.
    PermissionDenied,
    /// Microphone access failed for another reason.
    AccessFailed,
    /// The open input cannot be recorded.
    CaptureUnsupported,
    /// Capture could not start or the clip could not be assembled.
    RecordingFailed,
}

impl MicTestFault {
    /// User-facing message for this fault.
    pub fn message(self) -> &'static str {
        match self {
            MicTestFault::MediaInputUnsupported => "Audio input is not supported on this system.",
            MicTestFault::PermissionDenied => "Microphone permission was denied.",
            MicTestFault::AccessFailed => "Unable to access microphone.",
            MicTestFault::CaptureUnsupported => {
                "Audio recording is not supported for this microphone."
            }
            MicTestFault::RecordingFailed => "Unable to record audio.",
        }
    }
}

impl std::fmt::Display for MicTestFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Point-in-time copy of everything a view needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MicTestSnapshot<H> {
    /// Permission progress.
    pub permission: PermissionStatus,
    /// Recording progress.
    pub recording: RecordingStatus,
    /// Last failure, if any.
    pub fault: Option<MicTestFault>,
    /// Message for `fault`.
    pub error: Option<&'static str>,
    /// Handle of the live clip.
    pub clip: Option<H>,
    /// Seconds recorded so far.
    pub elapsed_seconds: u32,
    /// Auto-stop limit of the current (or last) recording.
    pub max_seconds: u32,
}

impl<H> MicTestSnapshot<H> {
    /// The permission control accepts input.
    pub fn can_request_permission(&self) -> bool {
        !matches!(
            self.permission,
            PermissionStatus::Requesting | PermissionStatus::Granted
        )
    }

    /// The record control accepts input.
    pub fn can_start_recording(&self) -> bool {
        self.permission == PermissionStatus::Granted && self.recording != RecordingStatus::Recording
    }

    /// A finished clip is available for playback.
    pub fn has_result(&self) -> bool {
        self.recording == RecordingStatus::Finished && self.clip.is_some()
    }
}
