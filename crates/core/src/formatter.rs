//! `%token` template substitution
//!
//! Every module renders its output through a template such as
//! `"E: %ip (%speed)"`. Only the tokens a module declares are substituted;
//! any other `%` sequence is copied verbatim so templates can carry literal
//! percent signs and unit strings.

use crate::constants::{BYTES_PER_GB, BYTES_PER_KB, BYTES_PER_MB, BYTES_PER_TB};
use regex::{Captures, Regex};

/// Values bound to token names for one render
#[derive(Debug, Clone, Default)]
pub struct TokenValues {
    values: Vec<(&'static str, String)>,
}

impl TokenValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `token` (without `%`) to an already formatted value
    pub fn with(mut self, token: &'static str, value: impl Into<String>) -> Self {
        self.set(token, value);
        self
    }

    pub fn set(&mut self, token: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.values.iter_mut().find(|(name, _)| *name == token) {
            Some(slot) => slot.1 = value,
            None => self.values.push((token, value)),
        }
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, value)| value.as_str())
    }
}

/// Template renderer for a fixed set of tokens, compiled once per sampler
#[derive(Debug, Clone)]
pub struct TokenFormatter {
    pattern: Option<Regex>,
}

impl TokenFormatter {
    /// Compile a matcher for `tokens` (names without the leading `%`).
    ///
    /// Longer names are tried first, so `%15min` is never read as `%1min`
    /// followed by `5min`.
    pub fn new(tokens: &[&str]) -> Result<Self, regex::Error> {
        let mut names: Vec<&str> = tokens.iter().copied().filter(|t| !t.is_empty()).collect();
        if names.is_empty() {
            return Ok(Self { pattern: None });
        }

        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        names.dedup();

        let alternatives: Vec<String> = names.iter().map(|name| regex::escape(name)).collect();
        let pattern = Regex::new(&format!("%({})", alternatives.join("|")))?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Substitute every bound token in `template` in a single pass.
    ///
    /// Substituted values are never scanned again. Tokens without a binding
    /// and unknown `%` sequences stay as written.
    pub fn render(&self, template: &str, values: &TokenValues) -> String {
        let Some(pattern) = &self.pattern else {
            return template.to_string();
        };

        pattern
            .replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

/// Format a byte count with a binary prefix, e.g. `"12.3 GB"`
pub fn format_bytes(bytes: u64) -> String {
    let bytes_f = bytes as f64;
    if bytes_f >= BYTES_PER_TB {
        format!("{:.1} TB", bytes_f / BYTES_PER_TB)
    } else if bytes_f >= BYTES_PER_GB {
        format!("{:.1} GB", bytes_f / BYTES_PER_GB)
    } else if bytes_f >= BYTES_PER_MB {
        format!("{:.1} MB", bytes_f / BYTES_PER_MB)
    } else if bytes_f >= BYTES_PER_KB {
        format!("{:.1} KB", bytes_f / BYTES_PER_KB)
    } else {
        format!("{} B", bytes)
    }
}
