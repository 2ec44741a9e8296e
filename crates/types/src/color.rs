//! Color types used by the output backends.
//!
//! Samplers only ever speak in [`SemanticColor`]s; the configured
//! [`ColorPalette`] turns those into concrete `#RRGGBB` values when a line is
//! rendered.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned for a color string that is not `#` followed by six hex digits
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}, expected the form #RRGGBB")]
pub struct InvalidColor(pub String);

/// A color in `#RRGGBB` form, validated on construction.
///
/// The original spelling is preserved so that the markup written to the bar
/// matches what the user configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Validate and wrap a color string
    pub fn parse(value: &str) -> Result<Self, InvalidColor> {
        let valid = value
            .strip_prefix('#')
            .is_some_and(|digits| digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()));

        if valid {
            Ok(Self(value.to_string()))
        } else {
            Err(InvalidColor(value.to_string()))
        }
    }

    /// Built-in defaults, known to be well formed
    pub(crate) fn from_static(value: &'static str) -> Self {
        debug_assert!(Self::parse(value).is_ok());
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HexColor {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Meaning attached to a rendered fragment, mapped to a palette color at render time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticColor {
    Good,
    Degraded,
    Bad,
    #[default]
    Neutral,
}

/// The four configured colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPalette {
    pub good: HexColor,
    pub degraded: HexColor,
    pub bad: HexColor,
    pub separator: HexColor,
}

impl ColorPalette {
    /// Concrete color for a semantic color; neutral fragments stay uncolored
    pub fn resolve(&self, color: SemanticColor) -> Option<&HexColor> {
        match color {
            SemanticColor::Good => Some(&self.good),
            SemanticColor::Degraded => Some(&self.degraded),
            SemanticColor::Bad => Some(&self.bad),
            SemanticColor::Neutral => None,
        }
    }
}
