//! Host bindings for one mic-test session: cpal microphone, tokio interval
//! timers, and the shared clip store.

use crate::{ClipStore, clip_store::ClipId};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use mic_test_core::{
    MicError,
    audio::{Clip, CpalInput, media_input_available},
    media::{AudioInput, MediaEnvironment, PendingInput, TickTimer, TimerId},
};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tracing::{debug, instrument};

/// Media environment backing a websocket session.
///
/// Timer ticks are sent to the session loop as [`TimerId`]s over `ticks`.
pub struct SessionEnvironment {
    clips: ClipStore,
    ticks: mpsc::UnboundedSender<TimerId>,
    next_timer: u64,
}

impl SessionEnvironment {
    /// Create an environment publishing into `clips` and ticking into `ticks`.
    pub(crate) fn new(clips: ClipStore, ticks: mpsc::UnboundedSender<TimerId>) -> Self {
        Self {
            clips,
            ticks,
            next_timer: 0,
        }
    }
}

impl MediaEnvironment for SessionEnvironment {
    type Input = CpalInput;
    type Timer = IntervalTimer;
    type Handle = ClipId;

    fn supports_media_input(&self) -> bool {
        media_input_available()
    }

    fn supports_capture(&self, input: &CpalInput) -> bool {
        input.format().is_encodable()
    }

    fn request_input(&mut self) -> PendingInput<CpalInput> {
        // Opening a device can block on the OS permission prompt.
        Box::pin(async {
            match tokio::task::spawn_blocking(CpalInput::open_default).await {
                Ok(result) => result,
                Err(e) => Err(MicError::DeviceError {
                    reason: format!("Microphone open task failed: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                }),
            }
        })
    }

    #[instrument(skip(self))]
    fn start_timer(&mut self, period: Duration) -> IntervalTimer {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;

        let ticks = self.ticks.clone();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if ticks.send(id).is_err() {
                    break;
                }
            }
        });

        debug!(%id, "Timer armed");

        IntervalTimer { id, task }
    }

    fn create_resource(&mut self, clip: Clip) -> ClipId {
        self.clips.insert(clip)
    }

    fn release_resource(&mut self, handle: &ClipId) {
        self.clips.remove(*handle);
    }
}

/// A tokio task sending one tick per period. Aborted on cancel or drop.
pub struct IntervalTimer {
    id: TimerId,
    task: JoinHandle<()>,
}

impl TickTimer for IntervalTimer {
    fn id(&self) -> TimerId {
        self.id
    }

    fn cancel(self) {
        debug!(id = %self.id, "Timer cancelled");
    }
}

impl Drop for IntervalTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
