use crate::config::{default_open_browser, default_port};

use serde::{Deserialize, Serialize};

/// Embedded web server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port for the embedded web server (bound on localhost).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Open the landing page in the default browser on start.
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            open_browser: default_open_browser(),
        }
    }
}
