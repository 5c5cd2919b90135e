//! Mic-test Core Library
//!
//! Microphone test coordination: permission request, timed test recording
//! and clip lifetime, with a cpal-backed microphone and WAV clips.
//!
//! # Example
//!
//! ```no_run
//! use mic_test_core::{MicTest, PermissionStatus};
//! # use mic_test_core::media::MediaEnvironment;
//!
//! # async fn run<E: MediaEnvironment>(env: E) {
//! let mut mic_test = MicTest::new(env);
//!
//! mic_test.request_permission().await;
//! if mic_test.permission() == PermissionStatus::Granted {
//!     mic_test.start_recording(5);
//! }
//! # }
//! ```

pub mod audio;
mod error;
pub mod media;
mod status;

pub use {
    error::MicError,
    error::Result as CoreResult,
    mic_test::{DEFAULT_MAX_SECONDS, MicTest, TICK_PERIOD},
    status::{MicTestFault, MicTestSnapshot, PermissionStatus, RecordingStatus},
};

#[cfg(test)]
mod tests;
