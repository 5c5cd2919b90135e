use crate::{MicTestFault, MicTestSnapshot, PermissionStatus, RecordingStatus};

fn snapshot(permission: PermissionStatus, recording: RecordingStatus) -> MicTestSnapshot<u64> {
    MicTestSnapshot {
        permission,
        recording,
        fault: None,
        error: None,
        clip: None,
        elapsed_seconds: 0,
        max_seconds: 5,
    }
}

/// WHAT: Permission control is disabled while requesting or once granted
/// WHY: Prevents duplicate requests from the view
#[test]
fn given_each_permission_status_when_checking_control_then_enabled_only_before_grant() {
    // Given/When/Then: Each permission status maps to the expected control state
    let cases = [
        (PermissionStatus::NotStarted, true),
        (PermissionStatus::Requesting, false),
        (PermissionStatus::Granted, false),
        (PermissionStatus::Denied, true),
        (PermissionStatus::Error, true),
    ];

    for (permission, enabled) in cases {
        let state = snapshot(permission, RecordingStatus::Idle);
        assert_eq!(state.can_request_permission(), enabled, "{:?}", permission);
    }
}

/// WHAT: Record control needs a grant and no recording in progress
/// WHY: Recording is impossible without an open stream
#[test]
fn given_granted_and_recording_states_when_checking_record_control_then_matches_rules() {
    // Given/When/Then: Only granted, non-recording states allow starting
    assert!(snapshot(PermissionStatus::Granted, RecordingStatus::Idle).can_start_recording());
    assert!(snapshot(PermissionStatus::Granted, RecordingStatus::Finished).can_start_recording());
    assert!(!snapshot(PermissionStatus::Granted, RecordingStatus::Recording).can_start_recording());
    assert!(!snapshot(PermissionStatus::Denied, RecordingStatus::Idle).can_start_recording());
}

/// WHAT: Results need both a finished status and a clip
/// WHY: The results panel must never point at a missing clip
#[test]
fn given_finished_without_clip_when_checking_result_then_no_result() {
    // Given: Finished states with and without a clip
    let without = snapshot(PermissionStatus::Granted, RecordingStatus::Finished);
    let mut with = without.clone();
    with.clip = Some(7);

    // When/Then: Only the one with a clip has a result
    assert!(!without.has_result());
    assert!(with.has_result());
}

/// WHAT: Fault messages are the user-facing strings
/// WHY: Views display them verbatim
#[test]
fn given_faults_when_displayed_then_user_messages() {
    // Given/When/Then: Display matches message()
    assert_eq!(
        MicTestFault::PermissionDenied.to_string(),
        "Microphone permission was denied."
    );
    assert_eq!(
        MicTestFault::AccessFailed.to_string(),
        MicTestFault::AccessFailed.message()
    );
}
