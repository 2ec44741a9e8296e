//! Local time sampler

use anyhow::{anyhow, bail, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use statline_core::{
    BoxedSampler, Fragment, ModuleConfig, ModuleInstance, Sampler, SamplerMetadata, TickContext,
};
use statline_types::source_configs::TimeConfig;
use std::fmt::Write;

static METADATA: SamplerMetadata = SamplerMetadata {
    id: "time",
    name: "Time",
    tokens: &[],
};

/// Check that chrono understands every specifier of a strftime template
pub fn validate_time_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        bail!("invalid time format {:?}", format);
    }
    Ok(())
}

/// Format `now` with a strftime template
pub fn format_time(now: &DateTime<Local>, format: &str) -> Result<String> {
    let mut text = String::new();
    write!(text, "{}", now.format(format))
        .map_err(|_| anyhow!("cannot format time with {:?}", format))?;
    Ok(text)
}

/// Time sampler
pub struct TimeSampler {
    config: TimeConfig,
}

impl TimeSampler {
    pub fn new(config: TimeConfig) -> Result<Self> {
        validate_time_format(&config.format)?;
        Ok(Self { config })
    }

    pub fn create(instance: &ModuleInstance) -> Result<BoxedSampler> {
        let ModuleConfig::Time(config) = &instance.config else {
            bail!("time sampler created for '{}'", instance.section);
        };
        Ok(Box::new(Self::new(config.clone())?))
    }
}

impl Sampler for TimeSampler {
    fn metadata(&self) -> &SamplerMetadata {
        &METADATA
    }

    fn sample(&mut self, tick: &TickContext) -> Result<Fragment> {
        match &tick.now {
            Some(now) => Ok(Fragment::neutral(format_time(now, &self.config.format)?)),
            None => Ok(Fragment::empty()),
        }
    }
}
