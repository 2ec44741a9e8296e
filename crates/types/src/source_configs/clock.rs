//! Clock source configuration types (`time`, `ddate`).

use serde::{Deserialize, Serialize};

fn default_time_format() -> String {
    "%d.%m.%Y %H:%M:%S".to_string()
}

fn default_ddate_format() -> String {
    "%{%a, %b %d%}, %Y%N - %H".to_string()
}

/// `time { ... }`, format is strftime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeConfig {
    #[serde(default = "default_time_format")]
    pub format: String,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            format: default_time_format(),
        }
    }
}

/// `ddate { ... }`, format uses the Discordian specifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DdateConfig {
    #[serde(default = "default_ddate_format")]
    pub format: String,
}

impl Default for DdateConfig {
    fn default() -> Self {
        Self {
            format: default_ddate_format(),
        }
    }
}
