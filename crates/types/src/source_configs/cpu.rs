//! CPU source configuration types (`load`, `cpu_usage`, `cpu_temperature`).

use serde::{Deserialize, Serialize};

fn default_load_format() -> String {
    "%1min %5min %15min".to_string()
}

fn default_usage_format() -> String {
    "%usage".to_string()
}

fn default_temperature_format() -> String {
    "%degrees C".to_string()
}

fn default_max_threshold() -> i64 {
    75
}

/// Thermal zone read when no `path` is configured; `%d` is the instance title
pub const DEFAULT_THERMAL_PATH: &str = "/sys/class/thermal/thermal_zone%d/temp";

/// `load { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadConfig {
    #[serde(default = "default_load_format")]
    pub format: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            format: default_load_format(),
        }
    }
}

/// `cpu_usage { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CpuUsageConfig {
    #[serde(default = "default_usage_format")]
    pub format: String,
}

impl Default for CpuUsageConfig {
    fn default() -> Self {
        Self {
            format: default_usage_format(),
        }
    }
}

/// `cpu_temperature <zone> { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CpuTemperatureConfig {
    #[serde(default = "default_temperature_format")]
    pub format: String,
    /// Millidegree file; `%d` is replaced by the instance title
    #[serde(default)]
    pub path: Option<String>,
    /// Degrees Celsius from which the fragment is tagged bad
    #[serde(default = "default_max_threshold")]
    pub max_threshold: i64,
}

impl Default for CpuTemperatureConfig {
    fn default() -> Self {
        Self {
            format: default_temperature_format(),
            path: None,
            max_threshold: default_max_threshold(),
        }
    }
}
