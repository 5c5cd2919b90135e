//! Seams between the coordinator and the host audio stack.
//!
//! The coordinator never touches a device, a timer or a clip store directly.
//! A [`MediaEnvironment`] hands it an input stream on request, arms a
//! repeating one-second timer, and turns assembled clips into handles the UI
//! can address. The binary wires these to cpal, tokio and an in-process clip
//! store; tests wire them to in-memory fakes.

use crate::{
    CoreResult,
    audio::{Clip, ClipFormat, Fragment},
};

use std::{fmt, future::Future, pin::Pin, time::Duration};

/// An in-flight request for an input stream.
///
/// Boxed and `'static` so an event loop can poll it alongside other events
/// without borrowing the environment.
pub type PendingInput<I> = Pin<Box<dyn Future<Output = CoreResult<I>> + Send + 'static>>;

/// Identifies one armed timer. Ticks carry the id of the timer that fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Host capabilities used by [`crate::MicTest`].
pub trait MediaEnvironment {
    /// Live microphone stream.
    type Input: AudioInput;
    /// Repeating timer.
    type Timer: TickTimer;
    /// Addressable reference to a published clip.
    type Handle: Clone + PartialEq + fmt::Debug;

    /// The host exposes an audio input capability.
    fn supports_media_input(&self) -> bool;

    /// The given input can be recorded into a clip.
    fn supports_capture(&self, input: &Self::Input) -> bool;

    /// Ask the host for a live input stream.
    ///
    /// Resolves to [`crate::MicError::PermissionDenied`] when access is
    /// refused; any other error is an access failure.
    fn request_input(&mut self) -> PendingInput<Self::Input>;

    /// Arm a timer that ticks every `period` until cancelled.
    fn start_timer(&mut self, period: Duration) -> Self::Timer;

    /// Publish a clip and return its handle.
    fn create_resource(&mut self, clip: Clip) -> Self::Handle;

    /// Withdraw a previously published clip.
    fn release_resource(&mut self, handle: &Self::Handle);
}

/// A live microphone stream.
pub trait AudioInput {
    /// Recorder bound to this stream.
    type Recorder: AudioRecorder;

    /// Shape of the samples this stream produces.
    fn format(&self) -> ClipFormat;

    /// The stream is still delivering audio.
    fn is_active(&self) -> bool;

    /// Start collecting fragments.
    ///
    /// # Errors
    ///
    /// Returns an error if capture cannot start on this stream.
    fn record(&mut self) -> CoreResult<Self::Recorder>;

    /// Stop the underlying device stream. Idempotent.
    fn stop_tracks(&mut self);
}

/// Collects fragments from an [`AudioInput`] while it is alive.
pub trait AudioRecorder {
    /// Fragments captured since the last drain.
    fn drain(&mut self) -> Vec<Fragment>;

    /// Stop capturing and return the fragments not yet drained.
    fn stop(self) -> Vec<Fragment>;
}

/// Handle to an armed repeating timer.
pub trait TickTimer {
    /// Id carried by this timer's ticks.
    fn id(&self) -> TimerId;

    /// Disarm the timer. No ticks with this id are accepted afterwards.
    fn cancel(self);
}
