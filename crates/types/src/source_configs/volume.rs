//! Volume source configuration types.

use serde::{Deserialize, Serialize};

fn default_format() -> String {
    "♪: %volume".to_string()
}

fn default_device() -> String {
    "default".to_string()
}

fn default_mixer() -> String {
    "Master".to_string()
}

/// `volume [label] { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VolumeConfig {
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_device")]
    pub device: String,
    #[serde(default = "default_mixer")]
    pub mixer: String,
    #[serde(default)]
    pub mixer_idx: u32,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            device: default_device(),
            mixer: default_mixer(),
            mixer_idx: 0,
        }
    }
}
