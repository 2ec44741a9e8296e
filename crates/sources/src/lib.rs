//! statline-sources: Module samplers for statline.

mod battery;
mod clock;
mod cpu;
mod cpu_temperature;
mod ddate;
mod disk;
mod ethernet;
mod ipv6;
mod net;
mod run_watch;
mod volume;
mod wireless;

pub use battery::{BatteryReading, BatterySampler, ChargeStatus};
pub use clock::{validate_time_format, TimeSampler};
pub use cpu::{CpuUsageSampler, LoadSampler};
pub use cpu_temperature::CpuTemperatureSampler;
pub use ddate::{DdateSampler, DiscordianDate};
pub use disk::{DiskSampler, DiskUsage};
pub use ethernet::EthernetSampler;
pub use ipv6::Ipv6Sampler;
pub use run_watch::RunWatchSampler;
pub use volume::VolumeSampler;
pub use wireless::WirelessSampler;

use statline_core::{ModuleKind, Registry};

/// Register all built-in samplers with a registry
pub fn register_all(registry: &mut Registry) {
    registry.register(ModuleKind::Ipv6, Ipv6Sampler::create);
    registry.register(ModuleKind::Wireless, WirelessSampler::create);
    registry.register(ModuleKind::Ethernet, EthernetSampler::create);
    registry.register(ModuleKind::Battery, BatterySampler::create);
    registry.register(ModuleKind::RunWatch, RunWatchSampler::create);
    registry.register(ModuleKind::Disk, DiskSampler::create);
    registry.register(ModuleKind::Load, LoadSampler::create);
    registry.register(ModuleKind::Time, TimeSampler::create);
    registry.register(ModuleKind::Ddate, DdateSampler::create);
    registry.register(ModuleKind::Volume, VolumeSampler::create);
    registry.register(ModuleKind::CpuTemperature, CpuTemperatureSampler::create);
    registry.register(ModuleKind::CpuUsage, CpuUsageSampler::create);
}

/// Registry with every built-in sampler
pub fn registry() -> Registry {
    let mut registry = Registry::new();
    register_all(&mut registry);
    registry
}
