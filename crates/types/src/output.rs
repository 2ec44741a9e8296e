//! Output format selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown output format {0:?} (expected auto, dzen2, xmobar or none)")]
pub struct UnknownOutputFormat(pub String);

/// Presentation syntax of the emitted line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OutputFormat {
    /// Resolved once at startup by inspecting the parent process
    #[default]
    Auto,
    Dzen2,
    Xmobar,
    /// Plain text, no markup
    None,
}

impl OutputFormat {
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Auto => "auto",
            OutputFormat::Dzen2 => "dzen2",
            OutputFormat::Xmobar => "xmobar",
            OutputFormat::None => "none",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownOutputFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(OutputFormat::Auto),
            "dzen2" => Ok(OutputFormat::Dzen2),
            "xmobar" => Ok(OutputFormat::Xmobar),
            "none" => Ok(OutputFormat::None),
            _ => Err(UnknownOutputFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = UnknownOutputFormat;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OutputFormat> for String {
    fn from(format: OutputFormat) -> Self {
        format.name().to_string()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
