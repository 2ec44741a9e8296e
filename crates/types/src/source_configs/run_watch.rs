//! Process watch configuration types.

use serde::{Deserialize, Serialize};

fn default_format() -> String {
    "%title: %status".to_string()
}

/// `run_watch <title> { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunWatchConfig {
    /// File holding the pid of the watched process
    #[serde(default)]
    pub pidfile: Option<String>,
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for RunWatchConfig {
    fn default() -> Self {
        Self {
            pidfile: None,
            format: default_format(),
        }
    }
}
