use error_location::ErrorLocation;
use thiserror::Error;

/// Microphone and clip errors with source location tracking.
#[derive(Error, Debug)]
pub enum MicError {
    /// No audio input device found.
    #[error("No microphone found {location}")]
    NoMicrophoneFound {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The host refused access to the microphone.
    #[error("Microphone permission denied: {reason} {location}")]
    PermissionDenied {
        /// Description reported by the audio backend.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio device operation failed.
    #[error("Audio device error: {reason} {location}")]
    DeviceError {
        /// Description of the device error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Captured audio could not be assembled into a playable clip.
    #[error("Clip encoding error: {reason} {location}")]
    EncodingError {
        /// Description of the encoding error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl MicError {
    /// Whether this error means the user or OS refused microphone access.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, MicError::PermissionDenied { .. })
    }
}

/// Result type alias using [`MicError`].
pub type Result<T> = std::result::Result<T, MicError>;
