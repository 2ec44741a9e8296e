//! CPU temperature sampler
//!
//! Reads a millidegree Celsius value from a sysfs file, by default the
//! thermal zone named by the instance title.

use anyhow::{anyhow, bail, Context, Result};
use statline_core::{
    BoxedSampler, Fragment, ModuleConfig, ModuleInstance, Sampler, SamplerMetadata, TickContext,
    TokenFormatter, TokenValues,
};
use statline_types::source_configs::{CpuTemperatureConfig, DEFAULT_THERMAL_PATH};
use std::path::PathBuf;

static METADATA: SamplerMetadata = SamplerMetadata {
    id: "cpu_temperature",
    name: "CPU Temperature",
    tokens: &["degrees"],
};

/// Parse a sysfs temperature (millidegrees Celsius) into whole degrees
pub fn parse_millidegrees(content: &str) -> Result<i64> {
    let millidegrees: i64 = content
        .trim()
        .parse()
        .with_context(|| format!("not a temperature: {:?}", content.trim()))?;
    Ok(millidegrees / 1000)
}

/// Expand the `%d` placeholder of a thermal path with the instance title
pub fn thermal_path(template: &str, zone: &str) -> PathBuf {
    PathBuf::from(template.replace("%d", zone))
}

/// CPU temperature sampler
pub struct CpuTemperatureSampler {
    path: PathBuf,
    config: CpuTemperatureConfig,
    formatter: TokenFormatter,
}

impl CpuTemperatureSampler {
    pub fn new(zone: &str, config: CpuTemperatureConfig) -> Result<Self> {
        let template = config.path.as_deref().unwrap_or(DEFAULT_THERMAL_PATH);
        let path = thermal_path(template, zone);
        log::info!("cpu_temperature {} reads {}", zone, path.display());

        Ok(Self {
            path,
            formatter: TokenFormatter::new(METADATA.tokens)?,
            config,
        })
    }

    pub fn create(instance: &ModuleInstance) -> Result<BoxedSampler> {
        let ModuleConfig::CpuTemperature(config) = &instance.config else {
            bail!("cpu_temperature sampler created for '{}'", instance.section);
        };
        let zone = instance
            .title()
            .ok_or_else(|| anyhow!("cpu_temperature needs a zone number as title"))?;
        Ok(Box::new(Self::new(zone, config.clone())?))
    }

    fn render(&self, degrees: i64) -> Fragment {
        let values = TokenValues::new().with("degrees", degrees.to_string());
        let text = self.formatter.render(&self.config.format, &values);

        if degrees >= self.config.max_threshold {
            Fragment::bad(text)
        } else {
            Fragment::neutral(text)
        }
    }
}

impl Sampler for CpuTemperatureSampler {
    fn metadata(&self) -> &SamplerMetadata {
        &METADATA
    }

    fn sample(&mut self, _tick: &TickContext) -> Result<Fragment> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        Ok(self.render(parse_millidegrees(&content)?))
    }
}
