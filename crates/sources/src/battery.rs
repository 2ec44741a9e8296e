//! Battery sampler
//!
//! Reads `/sys/class/power_supply/<name>/uevent`. Depending on the driver the
//! file reports energy (µWh, µW) or charge (µAh, µA); both are handled the
//! same way since only ratios are used.

use anyhow::{anyhow, bail, Context, Result};
use statline_core::{
    BoxedSampler, Fragment, ModuleConfig, ModuleInstance, Sampler, SamplerMetadata, TickContext,
    TokenFormatter, TokenValues,
};
use statline_types::source_configs::BatteryConfig;
use statline_types::SemanticColor;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Power supply base path
const POWER_SUPPLY_PATH: &str = "/sys/class/power_supply";

static METADATA: SamplerMetadata = SamplerMetadata {
    id: "battery",
    name: "Battery",
    tokens: &["status", "percentage", "remaining"],
};

/// Battery charging state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChargeStatus {
    Charging,
    Discharging,
    Full,
    #[default]
    Unknown,
}

impl ChargeStatus {
    /// Parses battery state from sysfs string.
    fn from_sysfs(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "charging" => Self::Charging,
            "discharging" => Self::Discharging,
            "full" => Self::Full,
            _ => Self::Unknown,
        }
    }

    /// Short label shown for `%status`
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Charging => "CHR",
            Self::Discharging => "BAT",
            Self::Full => "FULL",
            Self::Unknown => "UNK",
        }
    }
}

/// One snapshot of a battery
#[derive(Debug, Clone, PartialEq)]
pub struct BatteryReading {
    pub status: ChargeStatus,
    /// Charge level, 0-100
    pub percentage: Option<f64>,
    /// Time until empty (discharging) or full (charging)
    pub remaining: Option<Duration>,
}

impl BatteryReading {
    /// Parse the key/value lines of a power supply uevent file.
    ///
    /// With `last_full_capacity` the percentage is relative to the last full
    /// charge instead of the design capacity.
    pub fn from_uevent(content: &str, last_full_capacity: bool) -> Self {
        let fields: HashMap<&str, &str> = content
            .lines()
            .filter_map(|line| line.trim().strip_prefix("POWER_SUPPLY_"))
            .filter_map(|line| line.split_once('='))
            .collect();

        let number = |keys: &[&str]| {
            keys.iter()
                .find_map(|key| fields.get(key).and_then(|v| v.trim().parse::<f64>().ok()))
        };

        let status = fields
            .get("STATUS")
            .map(|s| ChargeStatus::from_sysfs(s))
            .unwrap_or_default();

        let now = number(&["ENERGY_NOW", "CHARGE_NOW"]);
        let full = if last_full_capacity {
            number(&["ENERGY_FULL", "CHARGE_FULL"])
        } else {
            number(&["ENERGY_FULL_DESIGN", "CHARGE_FULL_DESIGN"])
        };
        let rate = number(&["POWER_NOW", "CURRENT_NOW"]).map(f64::abs);

        let percentage = match (now, full) {
            (Some(now), Some(full)) if full > 0.0 => Some((now / full * 100.0).min(100.0)),
            // Some drivers only report the kernel's own capacity percentage
            _ => number(&["CAPACITY"]),
        };

        let remaining = match (status, now, full, rate) {
            (ChargeStatus::Discharging, Some(now), _, Some(rate)) if rate > 0.0 => {
                Some(hours(now / rate))
            }
            (ChargeStatus::Charging, Some(now), Some(full), Some(rate)) if rate > 0.0 => {
                Some(hours((full - now).max(0.0) / rate))
            }
            _ => None,
        };

        Self {
            status,
            percentage,
            remaining,
        }
    }

    /// Semantic color by charge level: below `low` bad, below `degraded`
    /// degraded, otherwise good
    pub fn color(&self, config: &BatteryConfig) -> SemanticColor {
        match self.percentage {
            Some(p) if p < f64::from(config.low_threshold) => SemanticColor::Bad,
            Some(p) if p < f64::from(config.degraded_threshold) => SemanticColor::Degraded,
            Some(_) => SemanticColor::Good,
            None => SemanticColor::Neutral,
        }
    }

    pub fn values(&self) -> TokenValues {
        TokenValues::new()
            .with("status", self.status.glyph())
            .with(
                "percentage",
                self.percentage
                    .map(|p| format!("{:.0}%", p))
                    .unwrap_or_default(),
            )
            .with(
                "remaining",
                self.remaining.map(format_remaining).unwrap_or_default(),
            )
    }
}

fn hours(value: f64) -> Duration {
    Duration::from_secs_f64((value * 3600.0).clamp(0.0, u32::MAX as f64))
}

/// `HH:MM:SS`
pub fn format_remaining(remaining: Duration) -> String {
    let seconds = remaining.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// Directory of the power supply named by an instance title: a bare number
/// `n` means `BAT<n>`, anything else is taken as the supply name
pub fn supply_dir(base: &Path, title: &str) -> PathBuf {
    if !title.is_empty() && title.chars().all(|c| c.is_ascii_digit()) {
        base.join(format!("BAT{}", title))
    } else {
        base.join(title)
    }
}

/// Battery sampler
pub struct BatterySampler {
    uevent_path: PathBuf,
    config: BatteryConfig,
    formatter: TokenFormatter,
}

impl BatterySampler {
    pub fn new(title: &str, config: BatteryConfig) -> Result<Self> {
        let uevent_path = supply_dir(Path::new(POWER_SUPPLY_PATH), title).join("uevent");
        Self::with_path(uevent_path, config)
    }

    /// Sampler reading an explicit uevent file
    pub fn with_path(uevent_path: PathBuf, config: BatteryConfig) -> Result<Self> {
        Ok(Self {
            uevent_path,
            config,
            formatter: TokenFormatter::new(METADATA.tokens)?,
        })
    }

    pub fn create(instance: &ModuleInstance) -> Result<BoxedSampler> {
        let ModuleConfig::Battery(config) = &instance.config else {
            bail!("battery sampler created for '{}'", instance.section);
        };
        let title = instance
            .title()
            .ok_or_else(|| anyhow!("battery needs a number or supply name as title"))?;
        Ok(Box::new(Self::new(title, config.clone())?))
    }

    pub fn render(&self, reading: &BatteryReading) -> Fragment {
        let text = self.formatter.render(&self.config.format, &reading.values());
        Fragment::new(text, reading.color(&self.config))
    }
}

impl Sampler for BatterySampler {
    fn metadata(&self) -> &SamplerMetadata {
        &METADATA
    }

    fn sample(&mut self, _tick: &TickContext) -> Result<Fragment> {
        let content = match std::fs::read_to_string(&self.uevent_path)
            .with_context(|| format!("reading {}", self.uevent_path.display()))
        {
            Ok(content) => content,
            Err(e) => {
                log::debug!("{:#}", e);
                return Ok(Fragment::bad("No battery"));
            }
        };

        let reading = BatteryReading::from_uevent(&content, self.config.last_full_capacity);
        Ok(self.render(&reading))
    }
}
