//! The test page: permission step, recording step, results.
//!
//! Only the panel changes while a session runs; it is re-rendered from a
//! [`MicTestSnapshot`] after every state change and swapped in by the page
//! script.

use crate::{
    clip_store::ClipId,
    config::RecordingConfig,
    views::{escape, layout::page},
};

use mic_test_core::{MicTestSnapshot, PermissionStatus, RecordingStatus};

/// Element id the page script replaces on every update.
pub(crate) const PANEL_ID: &str = "panel";

/// Full test page, showing the state before any session exists.
pub(crate) fn render_page(recording: &RecordingConfig) -> String {
    let initial = MicTestSnapshot::<ClipId> {
        permission: PermissionStatus::NotStarted,
        recording: RecordingStatus::Idle,
        fault: None,
        error: None,
        clip: None,
        elapsed_seconds: 0,
        max_seconds: recording.max_seconds,
    };

    let body = format!(
        r#"<main class="screen">
  <header class="topbar">
    <a class="button button-secondary button-sm" href="/">&larr; Back</a>
    <div class="title">Microphone Test</div>
  </header>
  <section id="{PANEL_ID}" aria-live="polite">
{panel}
  </section>
</main>"#,
        panel = render_panel(&initial, recording),
    );

    page("Microphone Test", &body, Some("/assets/mic-test.js"))
}

/// Panel markup for one state.
pub(crate) fn render_panel(state: &MicTestSnapshot<ClipId>, recording: &RecordingConfig) -> String {
    let mut html = String::new();
    html.push_str(r#"<div class="steps">"#);
    html.push_str(&permission_step(state));
    html.push_str(&recording_step(state, recording));
    html.push_str("</div>");

    if state.has_result() {
        if let Some(clip) = state.clip {
            html.push_str(&results(clip));
        }
    }

    html
}

fn permission_step(state: &MicTestSnapshot<ClipId>) -> String {
    let label = match state.permission {
        PermissionStatus::Requesting => r#"<span class="spinner"></span> Checking..."#,
        PermissionStatus::Granted => "&#9989; Mic Access Granted",
        _ => "Grant Microphone Permission",
    };

    let mut html = format!(
        r#"<div class="card step">
  <h2><span class="badge badge-ok" aria-hidden="true">&#10003;</span> 1. Check Access</h2>
  {button}"#,
        button = button(
            "request_permission",
            label,
            "button button-lg button-wide",
            !state.can_request_permission(),
        ),
    );

    if state.permission == PermissionStatus::Granted {
        html.push_str(r#"<p class="note note-ok">Mic is working &#9989;</p>"#);
    }

    if let Some(message) = state.error {
        html.push_str(&format!(
            r#"<p class="note note-error" role="alert">{}</p>"#,
            escape(message)
        ));
    }

    html.push_str("</div>");
    html
}

fn recording_step(state: &MicTestSnapshot<ClipId>, recording: &RecordingConfig) -> String {
    let is_recording = state.recording == RecordingStatus::Recording;

    let label = if is_recording {
        format!(
            r#"<span class="mic-indicator"></span> Recording... {}s"#,
            state.elapsed_seconds
        )
    } else {
        format!("&#9654; Start Recording ({}s)", recording.max_seconds)
    };

    let mut html = format!(
        r#"<div class="card step">
  <h2><span class="badge badge-time" aria-hidden="true">&#9201;</span> 2. Record Test</h2>
  <blockquote class="sentence">&quot;{sentence}&quot;</blockquote>
  {button}"#,
        sentence = escape(&recording.test_sentence),
        button = button(
            "start_recording",
            &label,
            "button button-lg button-wide",
            !state.can_start_recording(),
        ),
    );

    if is_recording {
        html.push_str(&button(
            "stop_recording",
            "&#9632; Stop",
            "button button-secondary button-wide",
            false,
        ));
    }

    if state.recording == RecordingStatus::Finished {
        html.push_str(r#"<p class="note note-ok">Audio captured successfully &#9989;</p>"#);
    }

    html.push_str("</div>");
    html
}

fn results(clip: ClipId) -> String {
    format!(
        r#"<div class="card results">
  <h3>Test Complete!</h3>
  <div class="checks">
    <p class="check">&#9989; Permission Granted</p>
    <p class="check">&#9989; Audio Recorded</p>
  </div>
  <audio controls src="{src}"></audio>
  {retry}
</div>"#,
        src = escape(&clip.url()),
        retry = button(
            "reset",
            "&#128260; Retry Test",
            "button button-secondary button-lg button-wide",
            false
        ),
    )
}

/// `label` is trusted markup; the other arguments are fixed strings.
fn button(action: &str, label: &str, class: &str, disabled: bool) -> String {
    format!(
        r#"<button type="button" class="{class}" data-action="{action}"{disabled}>{label}</button>"#,
        disabled = if disabled { " disabled" } else { "" },
    )
}
