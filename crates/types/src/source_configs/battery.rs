//! Battery source configuration types.

use serde::{Deserialize, Serialize};

fn default_format() -> String {
    "%status %percentage %remaining".to_string()
}

fn default_low_threshold() -> u32 {
    10
}

fn default_degraded_threshold() -> u32 {
    25
}

/// `battery <index> { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatteryConfig {
    #[serde(default = "default_format")]
    pub format: String,
    /// Compute the percentage against the last full charge instead of the design capacity
    #[serde(default)]
    pub last_full_capacity: bool,
    /// Below this percentage the fragment is tagged bad
    #[serde(default = "default_low_threshold")]
    pub low_threshold: u32,
    /// Below this percentage the fragment is tagged degraded
    #[serde(default = "default_degraded_threshold")]
    pub degraded_threshold: u32,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            last_full_capacity: false,
            low_threshold: default_low_threshold(),
            degraded_threshold: default_degraded_threshold(),
        }
    }
}
