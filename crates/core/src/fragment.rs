//! Per-tick values shared between the render loop and samplers

use chrono::{DateTime, Local, Utc};
use statline_types::SemanticColor;
use std::time::{SystemTime, UNIX_EPOCH};

/// Rendered output of one module for one tick
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    pub text: String,
    pub color: SemanticColor,
}

impl Fragment {
    pub fn new(text: impl Into<String>, color: SemanticColor) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }

    pub fn neutral(text: impl Into<String>) -> Self {
        Self::new(text, SemanticColor::Neutral)
    }

    pub fn good(text: impl Into<String>) -> Self {
        Self::new(text, SemanticColor::Good)
    }

    pub fn degraded(text: impl Into<String>) -> Self {
        Self::new(text, SemanticColor::Degraded)
    }

    pub fn bad(text: impl Into<String>) -> Self {
        Self::new(text, SemanticColor::Bad)
    }

    /// Nothing to show this tick
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Values captured once per tick and handed to every sampler
#[derive(Debug, Clone, Default)]
pub struct TickContext {
    /// Wall-clock time of this tick; `None` when the clock could not be read
    pub now: Option<DateTime<Local>>,
}

impl TickContext {
    /// Capture the current wall-clock time
    pub fn capture() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    /// A system time before the epoch counts as an unreadable clock
    pub fn from_system_time(time: SystemTime) -> Self {
        let now = time
            .duration_since(UNIX_EPOCH)
            .ok()
            .map(|_| DateTime::<Utc>::from(time).with_timezone(&Local));
        Self { now }
    }

    pub fn at(now: DateTime<Local>) -> Self {
        Self { now: Some(now) }
    }
}
