//! One mic-test session per websocket connection.
//!
//! The page opens the socket on load, and closing it (navigating away,
//! closing the tab) tears the session down. Inside the loop every
//! coordinator mutation happens on this task, one event at a time: page
//! commands, timer ticks and the permission result.

use crate::{
    AppError, AppResult, SessionCommand, SessionEnvironment,
    app::AppState,
    clip_store::ClipId,
    config::RecordingConfig,
    session_command::recording_limit,
    views,
};

use std::{
    future::{self, Future},
    panic::Location,
};

use axum::extract::ws::{Message, WebSocket};
use error_location::ErrorLocation;
use mic_test_core::{
    CoreResult, MicTest, MicTestSnapshot,
    media::{MediaEnvironment, PendingInput, TimerId},
};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Message pushed to the page after every state change.
#[derive(Serialize)]
struct SessionUpdate<'a> {
    panel: String,
    state: &'a MicTestSnapshot<ClipId>,
}

/// What the page sent.
#[derive(Debug)]
pub(crate) enum PageEvent {
    Command(SessionCommand),
    Ignored,
    Closed,
}

impl PageEvent {
    fn from_message(message: Option<Result<Message, axum::Error>>) -> Self {
        match message {
            Some(Ok(Message::Text(text))) => match SessionCommand::parse(text.as_str()) {
                Ok(command) => PageEvent::Command(command),
                Err(e) => {
                    warn!(error = %e, "Ignoring malformed command");
                    PageEvent::Ignored
                }
            },
            Some(Ok(Message::Close(_))) | None => PageEvent::Closed,
            Some(Ok(_)) => PageEvent::Ignored,
            Some(Err(e)) => {
                warn!(error = %e, "Websocket receive failed");
                PageEvent::Closed
            }
        }
    }
}

/// Connection between a session and its page.
pub(crate) trait SessionTransport {
    /// Next event from the page. [`PageEvent::Closed`] once it is gone.
    fn receive(&mut self) -> impl Future<Output = PageEvent> + Send;

    /// Push one serialized update to the page.
    fn send(&mut self, text: String) -> impl Future<Output = AppResult<()>> + Send;
}

impl SessionTransport for WebSocket {
    async fn receive(&mut self) -> PageEvent {
        PageEvent::from_message(self.recv().await)
    }

    async fn send(&mut self, text: String) -> AppResult<()> {
        WebSocket::send(self, Message::Text(text.into()))
            .await
            .map_err(|e| AppError::SessionError {
                reason: format!("Failed to send update: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

enum SessionEvent<I> {
    Page(PageEvent),
    Tick(TimerId),
    PermissionResolved(CoreResult<I>),
}

/// Drive a mic test for the lifetime of `socket`.
#[instrument(skip_all, fields(session_id = %Uuid::new_v4()))]
pub(crate) async fn run(socket: WebSocket, state: AppState) {
    let (tick_tx, tick_rx) = mpsc::unbounded_channel();
    let mic_test = MicTest::new(SessionEnvironment::new(state.clips.clone(), tick_tx));

    drive(mic_test, tick_rx, socket, &state.recording).await;
}

/// Serve `mic_test` over `transport` until the page leaves or an update
/// cannot be delivered, then tear it down.
pub(crate) async fn drive<E, T>(
    mut mic_test: MicTest<E>,
    mut ticks: mpsc::UnboundedReceiver<TimerId>,
    mut transport: T,
    recording: &RecordingConfig,
) where
    E: MediaEnvironment<Handle = ClipId>,
    T: SessionTransport,
{
    let mut pending: Option<PendingInput<E::Input>> = None;

    info!("Mic test session opened");

    let initial = render_update(&mic_test, recording);
    if let Err(e) = send_update(&mut transport, initial).await {
        warn!(error = ?e, "Failed to send initial state");
    } else {
        loop {
            let event = tokio::select! {
                page = transport.receive() => SessionEvent::Page(page),
                Some(timer) = ticks.recv() => SessionEvent::Tick(timer),
                result = resolve(&mut pending) => SessionEvent::PermissionResolved(result),
            };

            match event {
                SessionEvent::Page(PageEvent::Command(command)) => {
                    apply(&mut mic_test, command, &mut pending, recording)
                }
                SessionEvent::Page(PageEvent::Ignored) => continue,
                SessionEvent::Page(PageEvent::Closed) => break,
                SessionEvent::Tick(timer) => mic_test.on_tick(timer),
                SessionEvent::PermissionResolved(result) => {
                    pending = None;
                    mic_test.finish_permission_request(result);
                }
            }

            // Rendered before the await so the coordinator is never borrowed
            // across it.
            let update = render_update(&mic_test, recording);
            if let Err(e) = send_update(&mut transport, update).await {
                warn!(error = ?e, "Failed to publish state, closing session");
                break;
            }
        }
    }

    // An unresolved request keeps running on the blocking pool; its stream
    // is stopped when the result is dropped.
    drop(pending);
    mic_test.teardown();

    info!("Mic test session closed");
}

fn apply<E: MediaEnvironment>(
    mic_test: &mut MicTest<E>,
    command: SessionCommand,
    pending: &mut Option<PendingInput<E::Input>>,
    recording: &RecordingConfig,
) {
    debug!(?command, "Applying command");

    match command {
        SessionCommand::RequestPermission => {
            if let Some(request) = mic_test.begin_permission_request() {
                *pending = Some(request);
            }
        }
        SessionCommand::StartRecording { max_seconds } => {
            mic_test.start_recording(recording_limit(max_seconds, recording.max_seconds));
        }
        SessionCommand::StopRecording => mic_test.stop_recording(),
        SessionCommand::Reset => mic_test.reset(),
    }
}

/// Wait for the in-flight permission request, or forever if there is none.
async fn resolve<I>(pending: &mut Option<PendingInput<I>>) -> CoreResult<I> {
    match pending {
        Some(request) => request.await,
        None => future::pending().await,
    }
}

/// Render the page update for the current state.
fn render_update<E>(mic_test: &MicTest<E>, recording: &RecordingConfig) -> AppResult<String>
where
    E: MediaEnvironment<Handle = ClipId>,
{
    let snapshot = mic_test.snapshot();
    let update = SessionUpdate {
        panel: views::mic_test::render_panel(&snapshot, recording),
        state: &snapshot,
    };

    serde_json::to_string(&update).map_err(|e| AppError::SessionError {
        reason: format!("Failed to serialize update: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}

async fn send_update<T: SessionTransport>(
    transport: &mut T,
    update: AppResult<String>,
) -> AppResult<()> {
    transport.send(update?).await
}
