//! statline: a status line generator for dzen2, xmobar and plain-text bars
//!
//! This library provides the application layer of statline:
//! - Configuration discovery, parsing and validation
//! - Output format auto-detection
//! - The render loop that samples modules and writes one line per tick

pub mod config;
pub mod core;

// Re-export commonly used types
pub use config::{AppConfig, ConfigError};
pub use core::{RenderError, ShutdownSignal, UpdateManager};
