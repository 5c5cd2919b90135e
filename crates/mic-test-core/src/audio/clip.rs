use crate::{CoreResult, MicError};

use std::{io::Cursor, panic::Location, time::Duration};

use error_location::ErrorLocation;
use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::{debug, instrument};

/// Highest channel count the WAV encoder accepts.
const MAX_WAV_CHANNELS: u16 = 18;

/// Bit depth of assembled clips.
const CLIP_BITS_PER_SAMPLE: u16 = 16;

/// Shape of the interleaved samples produced by an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipFormat {
    /// Frames per second.
    pub sample_rate: u32,
    /// Interleaved channel count.
    pub channels: u16,
}

impl ClipFormat {
    /// Whether a clip in this format can be written as WAV.
    pub fn is_encodable(&self) -> bool {
        self.sample_rate > 0 && (1..=MAX_WAV_CHANNELS).contains(&self.channels)
    }
}

/// One buffer of interleaved f32 samples, as delivered by the input callback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    samples: Vec<f32>,
}

impl Fragment {
    /// Wrap a buffer of interleaved samples.
    pub fn new(samples: Vec<f32>) -> Self {
        Self { samples }
    }

    /// Interleaved samples in this fragment.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}

/// A playable recording: in-memory 16-bit PCM WAV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    format: ClipFormat,
    sample_count: usize,
    wav: Vec<u8>,
}

impl Clip {
    /// MIME type of [`Clip::wav`].
    pub const MIME_TYPE: &'static str = "audio/wav";

    /// Concatenate fragments into a single WAV clip.
    ///
    /// Samples outside `[-1.0, 1.0]` are clamped. An empty fragment list
    /// yields a valid WAV with no frames.
    ///
    /// # Errors
    ///
    /// Returns [`MicError::EncodingError`] if the format is not encodable or
    /// the writer fails.
    #[track_caller]
    #[instrument(skip(fragments), fields(fragment_count = fragments.len()))]
    pub fn assemble(format: ClipFormat, fragments: &[Fragment]) -> CoreResult<Self> {
        let location = Location::caller();

        if !format.is_encodable() {
            return Err(MicError::EncodingError {
                reason: format!("Unsupported clip format: {:?}", format),
                location: ErrorLocation::from(location),
            });
        }

        let spec = WavSpec {
            channels: format.channels,
            sample_rate: format.sample_rate,
            bits_per_sample: CLIP_BITS_PER_SAMPLE,
            sample_format: SampleFormat::Int,
        };

        let encoding_error = |e: hound::Error| MicError::EncodingError {
            reason: e.to_string(),
            location: ErrorLocation::from(location),
        };

        let mut cursor = Cursor::new(Vec::new());
        let mut sample_count = 0;
        {
            let mut writer = WavWriter::new(&mut cursor, spec).map_err(encoding_error)?;
            for sample in fragments.iter().flat_map(|f| f.samples().iter()) {
                writer
                    .write_sample(to_pcm16(*sample))
                    .map_err(encoding_error)?;
                sample_count += 1;
            }
            writer.finalize().map_err(encoding_error)?;
        }

        let wav = cursor.into_inner();
        debug!(sample_count, wav_bytes = wav.len(), "Clip assembled");

        Ok(Self {
            format,
            sample_count,
            wav,
        })
    }

    /// Format the clip was recorded in.
    pub fn format(&self) -> ClipFormat {
        self.format
    }

    /// Total interleaved samples.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Playback length.
    pub fn duration(&self) -> Duration {
        let frames = self.sample_count as f64 / f64::from(self.format.channels);
        Duration::from_secs_f64(frames / f64::from(self.format.sample_rate))
    }

    /// Encoded WAV bytes.
    pub fn wav(&self) -> &[u8] {
        &self.wav
    }

    /// Take the encoded WAV bytes.
    pub fn into_wav(self) -> Vec<u8> {
        self.wav
    }
}

fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}
