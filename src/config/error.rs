//! Configuration errors

use statline_types::{InvalidColor, SectionError};
use std::path::PathBuf;
use thiserror::Error;

/// Anything that stops a configuration from being loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration file found (searched: {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: unknown section '{name}'")]
    UnknownSection { line: usize, name: String },

    #[error("line {line}: unknown option '{name}'")]
    UnknownOption { line: usize, name: String },

    #[error("line {line}: section '{section}' defined twice")]
    DuplicateSection { line: usize, section: String },

    #[error("line {line}: {source}")]
    Section {
        line: usize,
        #[source]
        source: SectionError,
    },

    #[error("line {line}: invalid options for '{section}': {source}")]
    InvalidOptions {
        line: usize,
        section: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: '{option}': {source}")]
    InvalidColor {
        line: usize,
        option: String,
        #[source]
        source: InvalidColor,
    },

    #[error("'order' must be a list of strings")]
    InvalidOrder,

    #[error("'order' is empty, nothing to display")]
    EmptyOrder,

    #[error("'interval' must be at least 1 second")]
    InvalidInterval,

    #[error("invalid time format for '{section}': {message}")]
    InvalidTimeFormat { section: String, message: String },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
