//! Dispatch table from module kinds to sampler factories

use crate::sampler::BoxedSampler;
use anyhow::{anyhow, Result};
use statline_types::{ModuleInstance, ModuleKind};
use std::collections::HashMap;

/// Function that creates a sampler for one configured module instance
pub type SamplerFactory = fn(&ModuleInstance) -> Result<BoxedSampler>;

/// Registry of sampler factories, built once at startup
pub struct Registry {
    samplers: HashMap<ModuleKind, SamplerFactory>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            samplers: HashMap::new(),
        }
    }

    /// Register the factory for a module kind, replacing any previous one
    pub fn register(&mut self, kind: ModuleKind, factory: SamplerFactory) {
        if self.samplers.insert(kind, factory).is_some() {
            log::debug!("Replaced sampler factory for '{}'", kind);
        }
    }

    pub fn contains(&self, kind: ModuleKind) -> bool {
        self.samplers.contains_key(&kind)
    }

    /// Create the sampler for a configured instance
    pub fn create(&self, instance: &ModuleInstance) -> Result<BoxedSampler> {
        let factory = self
            .samplers
            .get(&instance.kind())
            .ok_or_else(|| anyhow!("No sampler registered for module '{}'", instance.kind()))?;
        factory(instance)
    }

    /// Module kinds that have no factory
    pub fn missing_kinds(&self) -> Vec<ModuleKind> {
        ModuleKind::ALL
            .into_iter()
            .filter(|kind| !self.contains(*kind))
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
