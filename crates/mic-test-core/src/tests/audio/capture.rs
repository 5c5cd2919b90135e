use crate::{
    MicError,
    audio::{CpalInput, capture::classify},
    media::{AudioInput, AudioRecorder},
};

use std::{panic::Location, thread::sleep, time::Duration};

/// WHAT: Backend errors mentioning refused access map to PermissionDenied
/// WHY: Denial and other failures are reported differently to the user
#[test]
fn given_permission_error_text_when_classifying_then_permission_denied() {
    // Given: Backend error descriptions
    let denied = classify(
        "Failed to build stream",
        "Operation not permitted",
        Location::caller(),
    );
    let missing = classify(
        "Failed to build stream",
        "The requested device is no longer available",
        Location::caller(),
    );

    // When/Then: Only the refusal is a denial
    assert!(denied.is_permission_denied());
    assert!(matches!(missing, MicError::DeviceError { .. }));
}

/// WHAT: Default microphone opens, records and closes
/// WHY: Validates the cpal stream lifecycle on real hardware
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
#[allow(clippy::unwrap_used)]
fn given_default_microphone_when_recording_briefly_then_fragments_captured() {
    // Given: The default microphone
    let mut input = CpalInput::open_default().unwrap();
    assert!(input.is_active());

    // When: Recording for half a second
    let mut recorder = input.record().unwrap();
    sleep(Duration::from_millis(500));
    let mut fragments = recorder.drain();
    fragments.extend(recorder.stop());
    input.stop_tracks();

    // Then: Audio arrived and the stream is closed
    assert!(!fragments.is_empty());
    assert!(!input.is_active());
}

/// WHAT: Stopping tracks twice is harmless
/// WHY: Teardown may run after an explicit stop
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
#[allow(clippy::unwrap_used)]
fn given_stopped_input_when_stopping_again_then_no_panic() {
    // Given: An opened then stopped input
    let mut input = CpalInput::open_default().unwrap();
    input.stop_tracks();

    // When: Stopping again and trying to record
    input.stop_tracks();
    let result = input.record();

    // Then: Recording is refused with a device error
    assert!(matches!(result, Err(MicError::DeviceError { .. })));
}
