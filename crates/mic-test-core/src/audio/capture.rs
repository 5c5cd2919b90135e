use crate::{
    CoreResult, MicError,
    audio::{ClipFormat, Fragment},
    media::{AudioInput, AudioRecorder},
};

use std::{
    panic::Location,
    sync::{
        Arc, Mutex, MutexGuard,
        atomic::{AtomicBool, Ordering},
    },
};

use cpal::{
    Device, FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument};

/// Maximum fragments held by one recorder (roughly 10 minutes of 10ms buffers).
/// Prevents unbounded memory growth if nobody drains the tap.
pub(crate) const MAX_TAP_FRAGMENTS: usize = 60_000;

/// Backend error text that indicates the OS refused microphone access.
const PERMISSION_MARKERS: [&str; 4] = ["permission", "denied", "not permitted", "unauthorized"];

/// Fragments written by the input callback while a recorder is armed.
/// `None` means no recorder is listening and buffers are dropped.
type Tap = Arc<Mutex<Option<Vec<Fragment>>>>;

/// Whether a host audio backend is compiled in and reachable.
pub fn media_input_available() -> bool {
    !cpal::available_hosts().is_empty()
}

/// Live stream from the host's default microphone.
///
/// The stream runs from [`CpalInput::open_default`] until
/// [`AudioInput::stop_tracks`] or drop. Audio is only kept while a
/// [`CpalRecorder`] is armed.
pub struct CpalInput {
    format: ClipFormat,
    stream: Option<Stream>,
    tap: Tap,
    /// Signals the audio callback to stop writing. Set before the stream is
    /// dropped so a late callback cannot push into the tap.
    shutdown: Arc<AtomicBool>,
}

impl CpalInput {
    /// Open and start the default input device.
    ///
    /// # Errors
    ///
    /// Returns [`MicError::NoMicrophoneFound`] without a device,
    /// [`MicError::PermissionDenied`] if the backend reports refused
    /// access, and [`MicError::DeviceError`] otherwise.
    #[track_caller]
    #[instrument]
    pub fn open_default() -> CoreResult<Self> {
        let location = Location::caller();
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or(MicError::NoMicrophoneFound {
                location: ErrorLocation::from(location),
            })?;

        let supported = device
            .default_input_config()
            .map_err(|e| classify("Failed to get config", e, location))?;

        let sample_format = supported.sample_format();
        let config: StreamConfig = supported.into();
        let format = ClipFormat {
            sample_rate: config.sample_rate,
            channels: config.channels,
        };

        let tap: Tap = Arc::new(Mutex::new(None));
        let shutdown = Arc::new(AtomicBool::new(false));

        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, &tap, &shutdown),
            SampleFormat::I16 => build_stream::<i16>(&device, &config, &tap, &shutdown),
            SampleFormat::U16 => build_stream::<u16>(&device, &config, &tap, &shutdown),
            SampleFormat::I32 => build_stream::<i32>(&device, &config, &tap, &shutdown),
            SampleFormat::U8 => build_stream::<u8>(&device, &config, &tap, &shutdown),
            SampleFormat::I8 => build_stream::<i8>(&device, &config, &tap, &shutdown),
            other => {
                return Err(MicError::DeviceError {
                    reason: format!("Unsupported sample format: {}", other),
                    location: ErrorLocation::from(location),
                });
            }
        }
        .map_err(|e| classify("Failed to build stream", e, location))?;

        stream
            .play()
            .map_err(|e| classify("Failed to start stream", e, location))?;

        info!(
            device_id = ?device.id(),
            sample_rate = format.sample_rate,
            channels = format.channels,
            sample_format = %sample_format,
            "Microphone stream opened"
        );

        Ok(Self {
            format,
            stream: Some(stream),
            tap,
            shutdown,
        })
    }
}

impl AudioInput for CpalInput {
    type Recorder = CpalRecorder;

    fn format(&self) -> ClipFormat {
        self.format
    }

    fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    #[track_caller]
    fn record(&mut self) -> CoreResult<CpalRecorder> {
        if self.stream.is_none() {
            return Err(MicError::DeviceError {
                reason: "Input stream already stopped".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        *lock_tap(&self.tap) = Some(Vec::new());
        debug!("Recorder armed");

        Ok(CpalRecorder {
            tap: Arc::clone(&self.tap),
        })
    }

    fn stop_tracks(&mut self) {
        self.shutdown.store(true, Ordering::Release);

        if let Some(stream) = self.stream.take() {
            if let Err(e) = stream.pause() {
                debug!(error = %e, "Pause before drop failed");
            }
            drop(stream);
            info!("Microphone stream closed");
        }

        lock_tap(&self.tap).take();
    }
}

impl Drop for CpalInput {
    fn drop(&mut self) {
        self.stop_tracks();
    }
}

/// Collects the fragments pushed into a [`CpalInput`]'s tap.
pub struct CpalRecorder {
    tap: Tap,
}

impl AudioRecorder for CpalRecorder {
    fn drain(&mut self) -> Vec<Fragment> {
        lock_tap(&self.tap)
            .as_mut()
            .map(std::mem::take)
            .unwrap_or_default()
    }

    fn stop(self) -> Vec<Fragment> {
        let fragments = lock_tap(&self.tap).take().unwrap_or_default();
        debug!(fragment_count = fragments.len(), "Recorder disarmed");
        fragments
    }
}

fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    tap: &Tap,
    shutdown: &Arc<AtomicBool>,
) -> Result<Stream, cpal::BuildStreamError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let tap = Arc::clone(tap);
    let shutdown = Arc::clone(shutdown);

    device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            if shutdown.load(Ordering::Acquire) || data.is_empty() {
                return;
            }
            let mut guard = lock_tap(&tap);
            if let Some(fragments) = guard.as_mut() {
                if fragments.len() >= MAX_TAP_FRAGMENTS {
                    return;
                }
                let samples = data.iter().map(|s| f32::from_sample(*s)).collect();
                fragments.push(Fragment::new(samples));
            }
        },
        |err| {
            error!("Audio stream error: {}", err);
        },
        None,
    )
}

/// Lock the tap, recovering from poison. The fragment list stays valid even
/// if a previous holder panicked.
fn lock_tap(tap: &Tap) -> MutexGuard<'_, Option<Vec<Fragment>>> {
    tap.lock().unwrap_or_else(|e| {
        error!("Fragment tap lock poisoned, recovering: {}", e);
        e.into_inner()
    })
}

/// Map a backend error to [`MicError`], separating refused access from
/// other device failures.
pub(crate) fn classify(
    context: &str,
    err: impl std::fmt::Display,
    location: &'static Location<'static>,
) -> MicError {
    let reason = format!("{}: {}", context, err);
    let lowered = reason.to_lowercase();

    if PERMISSION_MARKERS.iter().any(|m| lowered.contains(m)) {
        MicError::PermissionDenied {
            reason,
            location: ErrorLocation::from(location),
        }
    } else {
        MicError::DeviceError {
            reason,
            location: ErrorLocation::from(location),
        }
    }
}
