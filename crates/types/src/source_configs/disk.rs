//! Disk source configuration types.

use serde::{Deserialize, Serialize};

fn default_format() -> String {
    "%free".to_string()
}

/// `disk <mount point> { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiskConfig {
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}
