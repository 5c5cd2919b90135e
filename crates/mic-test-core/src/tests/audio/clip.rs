use crate::{
    MicError,
    audio::{Clip, ClipFormat, Fragment},
};

use std::{io::Cursor, time::Duration};

const MONO_16K: ClipFormat = ClipFormat {
    sample_rate: 16_000,
    channels: 1,
};

/// WHAT: Fragments are concatenated in order into one WAV
/// WHY: The played-back clip must contain everything captured
#[test]
#[allow(clippy::unwrap_used)]
fn given_fragments_when_assembling_then_wav_contains_all_samples_in_order() {
    // Given: Two fragments
    let fragments = vec![
        Fragment::new(vec![0.0, 0.5]),
        Fragment::new(vec![-0.5, 1.0]),
    ];

    // When: Assembling a clip
    let clip = Clip::assemble(MONO_16K, &fragments).unwrap();

    // Then: The WAV decodes to the same samples as 16-bit PCM
    let mut reader = hound::WavReader::new(Cursor::new(clip.wav().to_vec())).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.sample_rate, 16_000);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);

    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples, vec![0, 16383, -16383, i16::MAX]);
    assert_eq!(clip.sample_count(), 4);
}

/// WHAT: Out-of-range samples are clamped
/// WHY: Hot input must not wrap around into noise
#[test]
#[allow(clippy::unwrap_used)]
fn given_out_of_range_samples_when_assembling_then_clamped() {
    // Given: Samples beyond full scale
    let fragments = vec![Fragment::new(vec![2.0, -3.0])];

    // When: Assembling a clip
    let clip = Clip::assemble(MONO_16K, &fragments).unwrap();

    // Then: They are written at full scale
    let mut reader = hound::WavReader::new(Cursor::new(clip.into_wav())).unwrap();
    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples, vec![i16::MAX, -i16::MAX]);
}

/// WHAT: No fragments still yields a valid, empty clip
/// WHY: Stopping immediately must not fail the recording
#[test]
#[allow(clippy::unwrap_used)]
fn given_no_fragments_when_assembling_then_empty_wav() {
    // Given: No fragments

    // When: Assembling a clip
    let clip = Clip::assemble(MONO_16K, &[]).unwrap();

    // Then: A readable WAV with zero frames
    let reader = hound::WavReader::new(Cursor::new(clip.wav().to_vec())).unwrap();
    assert_eq!(reader.len(), 0);
    assert_eq!(clip.duration(), Duration::ZERO);
}

/// WHAT: Duration accounts for interleaved channels
/// WHY: The log and UI report real playback time
#[test]
#[allow(clippy::unwrap_used)]
fn given_stereo_second_when_assembling_then_duration_one_second() {
    // Given: One second of stereo at 8 kHz
    let format = ClipFormat {
        sample_rate: 8_000,
        channels: 2,
    };
    let fragments = vec![Fragment::new(vec![0.1; 16_000])];

    // When: Assembling a clip
    let clip = Clip::assemble(format, &fragments).unwrap();

    // Then: Duration is one second
    assert_eq!(clip.duration(), Duration::from_secs(1));
    assert_eq!(clip.format(), format);
}

/// WHAT: Unencodable formats are rejected
/// WHY: A zero sample rate or zero channels cannot be written as WAV
#[test]
fn given_invalid_format_when_assembling_then_encoding_error() {
    // Given: Formats the encoder cannot represent
    let zero_rate = ClipFormat {
        sample_rate: 0,
        channels: 1,
    };
    let zero_channels = ClipFormat {
        sample_rate: 16_000,
        channels: 0,
    };

    // When/Then: Both fail with EncodingError
    assert!(!zero_rate.is_encodable());
    assert!(matches!(
        Clip::assemble(zero_rate, &[]),
        Err(MicError::EncodingError { .. })
    ));
    assert!(matches!(
        Clip::assemble(zero_channels, &[]),
        Err(MicError::EncodingError { .. })
    ));
}
