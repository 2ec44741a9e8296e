//! Wired interface sampler

use crate::net;
use anyhow::{anyhow, bail, Result};
use statline_core::{
    BoxedSampler, Fragment, ModuleConfig, ModuleInstance, Sampler, SamplerMetadata, TickContext,
    TokenFormatter, TokenValues,
};
use statline_types::source_configs::EthernetConfig;
use std::net::Ipv4Addr;
use std::path::PathBuf;

static METADATA: SamplerMetadata = SamplerMetadata {
    id: "ethernet",
    name: "Ethernet",
    tokens: &["ip", "speed"],
};

/// State of a wired link for one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStatus {
    pub operstate: Option<String>,
    pub ip: Option<Ipv4Addr>,
    /// Mbit/s
    pub speed: Option<u32>,
}

impl LinkStatus {
    /// A link is up when it has an address and the kernel does not report it down
    pub fn is_up(&self) -> bool {
        self.ip.is_some() && self.operstate.as_deref() != Some("down")
    }

    pub fn values(&self) -> TokenValues {
        TokenValues::new()
            .with("ip", self.ip.map(|ip| ip.to_string()).unwrap_or_default())
            .with(
                "speed",
                self.speed
                    .map(|s| format!("{} Mbit/s", s))
                    .unwrap_or_else(|| "?".to_string()),
            )
    }
}

/// Ethernet sampler
pub struct EthernetSampler {
    interface: String,
    sysfs_dir: PathBuf,
    config: EthernetConfig,
    formatter: TokenFormatter,
}

impl EthernetSampler {
    pub fn new(interface: &str, config: EthernetConfig) -> Result<Self> {
        Ok(Self {
            interface: interface.to_string(),
            sysfs_dir: net::interface_dir(interface),
            config,
            formatter: TokenFormatter::new(METADATA.tokens)?,
        })
    }

    pub fn create(instance: &ModuleInstance) -> Result<BoxedSampler> {
        let ModuleConfig::Ethernet(config) = &instance.config else {
            bail!("ethernet sampler created for '{}'", instance.section);
        };
        let interface = instance
            .title()
            .ok_or_else(|| anyhow!("ethernet needs an interface name as title"))?;
        Ok(Box::new(Self::new(interface, config.clone())?))
    }

    pub fn render(&self, link: &LinkStatus) -> Fragment {
        if link.is_up() {
            Fragment::good(
                self.formatter
                    .render(&self.config.format_up, &link.values()),
            )
        } else {
            Fragment::bad(
                self.formatter
                    .render(&self.config.format_down, &link.values()),
            )
        }
    }
}

impl Sampler for EthernetSampler {
    fn metadata(&self) -> &SamplerMetadata {
        &METADATA
    }

    fn sample(&mut self, _tick: &TickContext) -> Result<Fragment> {
        let link = LinkStatus {
            operstate: net::operstate(&self.sysfs_dir),
            ip: net::lookup_ipv4(&self.interface),
            speed: net::link_speed(&self.sysfs_dir),
        };
        Ok(self.render(&link))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statline_types::SemanticColor;

    fn sampler() -> EthernetSampler {
        EthernetSampler::new("eth0", EthernetConfig::default()).unwrap()
    }

    #[test]
    fn test_link_up() {
        let link = LinkStatus {
            operstate: Some("up".to_string()),
            ip: Some(Ipv4Addr::new(192, 168, 1, 23)),
            speed: Some(1000),
        };
        let fragment = sampler().render(&link);
        assert_eq!(fragment.text, "E: 192.168.1.23 (1000 Mbit/s)");
        assert_eq!(fragment.color, SemanticColor::Good);
    }

    #[test]
    fn test_unknown_speed() {
        let link = LinkStatus {
            operstate: Some("unknown".to_string()),
            ip: Some(Ipv4Addr::new(10, 0, 0, 2)),
            speed: None,
        };
        assert_eq!(sampler().render(&link).text, "E: 10.0.0.2 (?)");
    }

    #[test]
    fn test_link_down() {
        let no_address = LinkStatus {
            operstate: Some("up".to_string()),
            ip: None,
            speed: Some(100),
        };
        let fragment = sampler().render(&no_address);
        assert_eq!(fragment.text, "E: down");
        assert_eq!(fragment.color, SemanticColor::Bad);

        let cable_pulled = LinkStatus {
            operstate: Some("down".to_string()),
            ip: Some(Ipv4Addr::new(10, 0, 0, 2)),
            speed: None,
        };
        assert!(!cable_pulled.is_up());
    }

    #[test]
    fn test_missing_interface_is_down() {
        let mut sampler = EthernetSampler::new("statline-none0", EthernetConfig::default()).unwrap();
        let fragment = sampler.sample(&TickContext::default()).unwrap();
        assert_eq!(fragment, Fragment::bad("E: down"));
    }
}
