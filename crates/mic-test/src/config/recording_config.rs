use crate::config::{default_max_seconds, default_test_sentence};

use serde::{Deserialize, Serialize};

/// Test recording configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Length of the test recording before it stops by itself.
    #[serde(default = "default_max_seconds")]
    pub max_seconds: u32,

    /// Sentence the user is asked to read aloud.
    #[serde(default = "default_test_sentence")]
    pub test_sentence: String,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            max_seconds: default_max_seconds(),
            test_sentence: default_test_sentence(),
        }
    }
}
