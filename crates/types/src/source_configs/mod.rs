//! Option types for the `general` section and every module kind.

pub mod battery;
pub mod clock;
pub mod cpu;
pub mod disk;
pub mod general;
pub mod network;
pub mod run_watch;
pub mod volume;

pub use battery::BatteryConfig;
pub use clock::{DdateConfig, TimeConfig};
pub use cpu::{CpuTemperatureConfig, CpuUsageConfig, LoadConfig, DEFAULT_THERMAL_PATH};
pub use disk::DiskConfig;
pub use general::GeneralConfig;
pub use network::{EthernetConfig, Ipv6Config, WirelessConfig};
pub use run_watch::RunWatchConfig;
pub use volume::VolumeConfig;

use crate::module::ModuleKind;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type-safe enum for the resolved options of one module instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "module")]
#[serde(rename_all = "snake_case")]
pub enum ModuleConfig {
    Ipv6(Ipv6Config),
    Wireless(WirelessConfig),
    Ethernet(EthernetConfig),
    Battery(BatteryConfig),
    RunWatch(RunWatchConfig),
    Disk(DiskConfig),
    Load(LoadConfig),
    Time(TimeConfig),
    Ddate(DdateConfig),
    Volume(VolumeConfig),
    CpuTemperature(CpuTemperatureConfig),
    CpuUsage(CpuUsageConfig),
}

fn typed<T: DeserializeOwned>(options: &Map<String, Value>) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(options.clone()))
}

impl ModuleConfig {
    /// Get the module kind of this config
    pub fn kind(&self) -> ModuleKind {
        match self {
            ModuleConfig::Ipv6(_) => ModuleKind::Ipv6,
            ModuleConfig::Wireless(_) => ModuleKind::Wireless,
            ModuleConfig::Ethernet(_) => ModuleKind::Ethernet,
            ModuleConfig::Battery(_) => ModuleKind::Battery,
            ModuleConfig::RunWatch(_) => ModuleKind::RunWatch,
            ModuleConfig::Disk(_) => ModuleKind::Disk,
            ModuleConfig::Load(_) => ModuleKind::Load,
            ModuleConfig::Time(_) => ModuleKind::Time,
            ModuleConfig::Ddate(_) => ModuleKind::Ddate,
            ModuleConfig::Volume(_) => ModuleKind::Volume,
            ModuleConfig::CpuTemperature(_) => ModuleKind::CpuTemperature,
            ModuleConfig::CpuUsage(_) => ModuleKind::CpuUsage,
        }
    }

    /// Build the typed config of `kind` from an untyped option bag.
    ///
    /// Missing options take their documented defaults; unknown options and
    /// mistyped values are errors.
    pub fn from_options(kind: ModuleKind, options: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            ModuleKind::Ipv6 => ModuleConfig::Ipv6(typed(options)?),
            ModuleKind::Wireless => ModuleConfig::Wireless(typed(options)?),
            ModuleKind::Ethernet => ModuleConfig::Ethernet(typed(options)?),
            ModuleKind::Battery => ModuleConfig::Battery(typed(options)?),
            ModuleKind::RunWatch => ModuleConfig::RunWatch(typed(options)?),
            ModuleKind::Disk => ModuleConfig::Disk(typed(options)?),
            ModuleKind::Load => ModuleConfig::Load(typed(options)?),
            ModuleKind::Time => ModuleConfig::Time(typed(options)?),
            ModuleKind::Ddate => ModuleConfig::Ddate(typed(options)?),
            ModuleKind::Volume => ModuleConfig::Volume(typed(options)?),
            ModuleKind::CpuTemperature => ModuleConfig::CpuTemperature(typed(options)?),
            ModuleKind::CpuUsage => ModuleConfig::CpuUsage(typed(options)?),
        })
    }

    /// Create the default config for a module kind
    pub fn default_for(kind: ModuleKind) -> Self {
        match kind {
            ModuleKind::Ipv6 => ModuleConfig::Ipv6(Ipv6Config::default()),
            ModuleKind::Wireless => ModuleConfig::Wireless(WirelessConfig::default()),
            ModuleKind::Ethernet => ModuleConfig::Ethernet(EthernetConfig::default()),
            ModuleKind::Battery => ModuleConfig::Battery(BatteryConfig::default()),
            ModuleKind::RunWatch => ModuleConfig::RunWatch(RunWatchConfig::default()),
            ModuleKind::Disk => ModuleConfig::Disk(DiskConfig::default()),
            ModuleKind::Load => ModuleConfig::Load(LoadConfig::default()),
            ModuleKind::Time => ModuleConfig::Time(TimeConfig::default()),
            ModuleKind::Ddate => ModuleConfig::Ddate(DdateConfig::default()),
            ModuleKind::Volume => ModuleConfig::Volume(VolumeConfig::default()),
            ModuleKind::CpuTemperature => ModuleConfig::CpuTemperature(CpuTemperatureConfig::default()),
            ModuleKind::CpuUsage => ModuleConfig::CpuUsage(CpuUsageConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_empty_options_give_defaults() {
        for kind in ModuleKind::ALL {
            let config = ModuleConfig::from_options(kind, &Map::new()).unwrap();
            assert_eq!(config, ModuleConfig::default_for(kind));
            assert_eq!(config.kind(), kind);
        }
    }

    #[test]
    fn test_battery_defaults() {
        let config = BatteryConfig::default();
        assert_eq!(config.format, "%status %percentage %remaining");
        assert!(!config.last_full_capacity);
    }

    #[test]
    fn test_options_override_defaults() {
        let config = ModuleConfig::from_options(
            ModuleKind::Volume,
            &options(json!({"device": "hw:0", "mixer_idx": 2})),
        )
        .unwrap();
        let ModuleConfig::Volume(volume) = config else {
            panic!("expected a volume config");
        };
        assert_eq!(volume.device, "hw:0");
        assert_eq!(volume.mixer_idx, 2);
        assert_eq!(volume.mixer, "Master");
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let result = ModuleConfig::from_options(ModuleKind::Load, &options(json!({"fromat": "%1min"})));
        assert!(result.is_err());
    }

    #[test]
    fn test_mistyped_option_is_rejected() {
        let result = ModuleConfig::from_options(
            ModuleKind::Battery,
            &options(json!({"last_full_capacity": "sometimes"})),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_general_rejects_bad_color() {
        let result: Result<GeneralConfig, _> = serde_json::from_value(json!({"color_bad": "#F00"}));
        assert!(result.is_err());
    }
}
