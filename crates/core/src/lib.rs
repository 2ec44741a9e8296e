//! statline-core: Core traits and dispatch table for statline.
//!
//! This crate contains the [`Sampler`] trait every module implements, the
//! `%token` [`TokenFormatter`], the per-tick [`TickContext`] and the typed
//! [`Registry`] mapping module kinds to sampler factories.

pub mod constants;
pub mod formatter;
mod fragment;
mod registry;
mod sampler;

pub use constants::{BYTES_PER_GB, BYTES_PER_KB, BYTES_PER_MB, BYTES_PER_TB};
pub use formatter::{format_bytes, TokenFormatter, TokenValues};
pub use fragment::{Fragment, TickContext};
pub use registry::{Registry, SamplerFactory};
pub use sampler::{BoxedSampler, Sampler, SamplerMetadata};

// Re-export types used in trait signatures for convenience
pub use statline_types::{ModuleConfig, ModuleInstance, ModuleKind, SemanticColor};
