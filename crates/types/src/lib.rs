//! statline-types: Shared data types for the statline status line generator.
//!
//! This crate contains pure data types (colors, output formats, module kinds,
//! per-module option structs) shared by every statline crate. Nothing in here
//! touches the operating system.

pub mod color;
pub mod module;
pub mod output;
pub mod source_configs;

// Re-export commonly used types at the crate root for convenience
pub use color::{ColorPalette, HexColor, InvalidColor, SemanticColor};
pub use module::{ModuleInstance, ModuleKind, SectionError, SectionRef};
pub use output::{OutputFormat, UnknownOutputFormat};
pub use source_configs::{GeneralConfig, ModuleConfig};
