//! Mic-Test: check that a microphone works by granting access, recording a
//! short clip and playing it back, from a local web page.

mod app;
mod clip_store;
mod config;
mod error;
mod routes;
mod session;
mod session_command;
mod session_environment;
mod views;

pub(crate) use {
    app::App,
    clip_store::ClipStore,
    error::{AppError, Result as AppResult},
    session_command::SessionCommand,
    session_environment::SessionEnvironment,
};

use crate::config::Config;

use tracing::error;

/// Application entry point.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("mic_test=debug,mic_test_core=debug,tower_http=info")
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = App::new(config).run().await {
        error!(error = ?e, "App error");
        std::process::exit(1);
    }
}
