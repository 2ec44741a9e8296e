//! Sampler trait and related types

use crate::fragment::{Fragment, TickContext};
use anyhow::Result;

/// Metadata about a sampler
#[derive(Debug, Clone)]
pub struct SamplerMetadata {
    /// Section name of the module kind (e.g. "battery")
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Tokens this sampler binds in its templates, without the leading `%`
    pub tokens: &'static [&'static str],
}

/// Trait for all module samplers
///
/// A sampler reads one piece of system state per tick and renders it through
/// its configured template. Samplers are created once at startup and sampled
/// once per tick, in `order`.
pub trait Sampler {
    /// Get metadata about this sampler
    fn metadata(&self) -> &SamplerMetadata;

    /// Read the current state and render it.
    ///
    /// An error means the state could not be read this tick; the render loop
    /// logs it and emits an empty fragment tagged bad instead of stopping.
    fn sample(&mut self, tick: &TickContext) -> Result<Fragment>;
}

/// Type-erased sampler for dynamic dispatch
pub type BoxedSampler = Box<dyn Sampler>;
