use crate::{AppError, AppResult, ClipStore, config::Config, config::RecordingConfig, routes};

use std::{net::Ipv4Addr, panic::Location, sync::Arc};

use axum::Router;
use error_location::ErrorLocation;
use tokio::net::TcpListener;
use tracing::{error, info, instrument, warn};

/// State shared by every request handler and session.
#[derive(Debug, Clone)]
pub struct AppState {
    pub(crate) clips: ClipStore,
    pub(crate) recording: Arc<RecordingConfig>,
}

impl AppState {
    /// Fresh state with an empty clip store.
    pub(crate) fn new(recording: RecordingConfig) -> Self {
        Self {
            clips: ClipStore::default(),
            recording: Arc::new(recording),
        }
    }
}

/// Main application: the embedded web server.
pub struct App {
    pub(crate) config: Config,
    pub(crate) state: AppState,
}

impl App {
    /// Build the application from loaded configuration.
    pub(crate) fn new(config: Config) -> Self {
        let state = AppState::new(config.recording.clone());
        Self { config, state }
    }

    /// Router serving the application.
    pub(crate) fn router(&self) -> Router {
        routes::router(self.state.clone())
    }

    /// Serve until Ctrl-C.
    #[track_caller]
    #[instrument(skip(self))]
    pub(crate) async fn run(self) -> AppResult<()> {
        let location = Location::caller();
        let port = self.config.server.port;

        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, port))
            .await
            .map_err(|e| AppError::ServerError {
                reason: format!("Failed to bind port {}: {}", port, e),
                location: ErrorLocation::from(location),
            })?;

        let url = self.config.server_url();
        info!(url = %url, "Mic test server listening");

        if self.config.server.open_browser {
            if let Err(e) = open::that(&url) {
                warn!(error = %e, "Failed to open browser");
            }
        }

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::ServerError {
                reason: format!("Server failed: {}", e),
                location: ErrorLocation::from(location),
            })?;

        info!(live_clips = self.state.clips.len(), "Mic test server shut down");

        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => error!(error = %e, "Failed to listen for Ctrl-C"),
    }
}
