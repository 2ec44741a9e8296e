//! Configuration management

pub mod discovery;
mod error;
pub mod parser;
mod settings;

pub use discovery::{default_config_path, resolve_config_path, CONFIG_CANDIDATES};
pub use error::ConfigError;
pub use settings::AppConfig;
