//! HTTP surface: the two pages, the session socket, clips and assets.

use crate::{app::AppState, clip_store::ClipId, session, views};

use axum::{
    Router,
    extract::{Path, State, WebSocketUpgrade},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use mic_test_core::audio::Clip;
use tower_http::trace::TraceLayer;
use tracing::debug;
use uuid::Uuid;

const STYLE_CSS: &str = include_str!("../assets/style.css");
const MIC_TEST_JS: &str = include_str!("../assets/mic-test.js");

/// Build the application router.
pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/mic-test", get(mic_test_page))
        .route("/mic-test/session", get(mic_test_session))
        .route("/mic-test/clips/{id}", get(clip))
        .route("/assets/style.css", get(style))
        .route("/assets/mic-test.js", get(script))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn landing() -> Html<String> {
    Html(views::landing_page())
}

async fn mic_test_page(State(state): State<AppState>) -> Html<String> {
    Html(views::mic_test::render_page(&state.recording))
}

async fn mic_test_session(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| session::run(socket, state))
}

async fn clip(Path(id): Path<Uuid>, State(state): State<AppState>) -> Response {
    match state.clips.get(ClipId::from(id)) {
        Some(wav) => (
            [
                (header::CONTENT_TYPE, Clip::MIME_TYPE),
                (header::CACHE_CONTROL, "no-store"),
            ],
            wav,
        )
            .into_response(),
        None => {
            debug!(clip_id = %id, "Clip not found");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

async fn style() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS)
}

async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        MIC_TEST_JS,
    )
}
