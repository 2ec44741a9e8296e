//! Global display options (`general { ... }`)

use serde::{Deserialize, Serialize};

use crate::color::{ColorPalette, HexColor};
use crate::output::OutputFormat;

fn default_colors() -> bool {
    true
}

fn default_color_good() -> HexColor {
    HexColor::from_static("#00FF00")
}

fn default_color_degraded() -> HexColor {
    HexColor::from_static("#FFFF00")
}

fn default_color_bad() -> HexColor {
    HexColor::from_static("#FF0000")
}

fn default_color_separator() -> HexColor {
    HexColor::from_static("#333333")
}

fn default_interval() -> u64 {
    1
}

/// Options of the `general` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default = "default_colors")]
    pub colors: bool,
    #[serde(default = "default_color_good")]
    pub color_good: HexColor,
    #[serde(default = "default_color_degraded")]
    pub color_degraded: HexColor,
    #[serde(default = "default_color_bad")]
    pub color_bad: HexColor,
    #[serde(default = "default_color_separator")]
    pub color_separator: HexColor,
    /// Seconds between two lines, at least 1
    #[serde(default = "default_interval")]
    pub interval: u64,
}

impl GeneralConfig {
    pub fn palette(&self) -> ColorPalette {
        ColorPalette {
            good: self.color_good.clone(),
            degraded: self.color_degraded.clone(),
            bad: self.color_bad.clone(),
            separator: self.color_separator.clone(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Auto,
            colors: default_colors(),
            color_good: default_color_good(),
            color_degraded: default_color_degraded(),
            color_bad: default_color_bad(),
            color_separator: default_color_separator(),
            interval: default_interval(),
        }
    }
}
