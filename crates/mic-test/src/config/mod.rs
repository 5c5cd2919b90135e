mod recording_config;
#[allow(clippy::module_inception)]
mod config;
mod server_config;

pub(crate) use {
    config::Config, recording_config::RecordingConfig, server_config::ServerConfig,
};

pub(crate) const DEFAULT_PORT: u16 = 7879;
pub(crate) const DEFAULT_OPEN_BROWSER: bool = true;
pub(crate) const DEFAULT_MAX_SECONDS: u32 = mic_test_core::DEFAULT_MAX_SECONDS;
pub(crate) const MAX_RECORDING_SECONDS: u32 = 60;
pub(crate) const DEFAULT_TEST_SENTENCE: &str =
    "Hello, this is a microphone test. Please speak clearly.";

pub(crate) fn default_port() -> u16 {
    DEFAULT_PORT
}

pub(crate) fn default_open_browser() -> bool {
    DEFAULT_OPEN_BROWSER
}

pub(crate) fn default_max_seconds() -> u32 {
    DEFAULT_MAX_SECONDS
}

pub(crate) fn default_test_sentence() -> String {
    DEFAULT_TEST_SENTENCE.to_string()
}
