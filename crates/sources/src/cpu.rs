//! CPU samplers: load average and CPU usage

use anyhow::{bail, Result};
use statline_core::{
    BoxedSampler, Fragment, ModuleConfig, ModuleInstance, Sampler, SamplerMetadata, TickContext,
    TokenFormatter, TokenValues,
};
use statline_types::source_configs::{CpuUsageConfig, LoadConfig};
use sysinfo::{CpuRefreshKind, LoadAvg, RefreshKind, System};

static LOAD_METADATA: SamplerMetadata = SamplerMetadata {
    id: "load",
    name: "Load Average",
    tokens: &["1min", "5min", "15min"],
};

static USAGE_METADATA: SamplerMetadata = SamplerMetadata {
    id: "cpu_usage",
    name: "CPU Usage",
    tokens: &["usage"],
};

/// Token bindings for a load average, two decimals each
pub fn load_values(load: &LoadAvg) -> TokenValues {
    TokenValues::new()
        .with("1min", format!("{:.2}", load.one))
        .with("5min", format!("{:.2}", load.five))
        .with("15min", format!("{:.2}", load.fifteen))
}

/// Load average sampler
pub struct LoadSampler {
    config: LoadConfig,
    formatter: TokenFormatter,
}

impl LoadSampler {
    pub fn new(config: LoadConfig) -> Result<Self> {
        Ok(Self {
            config,
            formatter: TokenFormatter::new(LOAD_METADATA.tokens)?,
        })
    }

    pub fn create(instance: &ModuleInstance) -> Result<BoxedSampler> {
        let ModuleConfig::Load(config) = &instance.config else {
            bail!("load sampler created for '{}'", instance.section);
        };
        Ok(Box::new(Self::new(config.clone())?))
    }
}

impl Sampler for LoadSampler {
    fn metadata(&self) -> &SamplerMetadata {
        &LOAD_METADATA
    }

    fn sample(&mut self, _tick: &TickContext) -> Result<Fragment> {
        let load = System::load_average();
        Ok(Fragment::neutral(
            self.formatter.render(&self.config.format, &load_values(&load)),
        ))
    }
}

/// Format a usage percentage the way the bar shows it, e.g. `"07%"`
pub fn format_usage(usage: f32) -> String {
    let usage = usage.clamp(0.0, 100.0).round() as u32;
    format!("{:02}%", usage)
}

/// CPU usage sampler
///
/// Usage is the busy share of CPU time since the previous tick, so this is
/// the one sampler that keeps the previous counters around (inside sysinfo).
pub struct CpuUsageSampler {
    config: CpuUsageConfig,
    formatter: TokenFormatter,
    system: System,
}

impl CpuUsageSampler {
    pub fn new(config: CpuUsageConfig) -> Result<Self> {
        // Initialize system with CPU refresh configuration
        let system = System::new_with_specifics(
            RefreshKind::new().with_cpu(CpuRefreshKind::new().with_cpu_usage()),
        );

        Ok(Self {
            config,
            formatter: TokenFormatter::new(USAGE_METADATA.tokens)?,
            system,
        })
    }

    pub fn create(instance: &ModuleInstance) -> Result<BoxedSampler> {
        let ModuleConfig::CpuUsage(config) = &instance.config else {
            bail!("cpu_usage sampler created for '{}'", instance.section);
        };
        Ok(Box::new(Self::new(config.clone())?))
    }
}

impl Sampler for CpuUsageSampler {
    fn metadata(&self) -> &SamplerMetadata {
        &USAGE_METADATA
    }

    fn sample(&mut self, _tick: &TickContext) -> Result<Fragment> {
        self.system.refresh_cpu_all();
        let usage = self.system.global_cpu_usage();

        let values = TokenValues::new().with("usage", format_usage(usage));
        Ok(Fragment::neutral(
            self.formatter.render(&self.config.format, &values),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_values() {
        let load = LoadAvg {
            one: 0.1,
            five: 1.5,
            fifteen: 12.0,
        };
        let formatter = TokenFormatter::new(LOAD_METADATA.tokens).unwrap();
        assert_eq!(
            formatter.render("%1min %5min %15min", &load_values(&load)),
            "0.10 1.50 12.00"
        );
    }

    #[test]
    fn test_format_usage() {
        assert_eq!(format_usage(7.4), "07%");
        assert_eq!(format_usage(99.6), "100%");
        assert_eq!(format_usage(-1.0), "00%");
    }

    #[test]
    fn test_load_sampler_renders_three_numbers() {
        let mut sampler = LoadSampler::new(LoadConfig::default()).unwrap();
        let fragment = sampler.sample(&TickContext::default()).unwrap();
        assert_eq!(fragment.text.split(' ').count(), 3);
    }

    #[test]
    fn test_cpu_usage_sampler_renders_percentage() {
        let mut sampler = CpuUsageSampler::new(CpuUsageConfig::default()).unwrap();
        let fragment = sampler.sample(&TickContext::default()).unwrap();
        assert!(fragment.text.ends_with('%'));
    }
}
