//! IPv6 connectivity sampler
//!
//! Connecting a UDP socket sends nothing but makes the kernel pick the source
//! address it would route with, which is the address shown.

use anyhow::{bail, Result};
use statline_core::{
    BoxedSampler, Fragment, ModuleConfig, ModuleInstance, Sampler, SamplerMetadata, TickContext,
    TokenFormatter, TokenValues,
};
use statline_types::source_configs::Ipv6Config;
use std::io;
use std::net::{IpAddr, Ipv6Addr, SocketAddr, UdpSocket};

/// A globally routed address (Google public DNS)
const PROBE_ADDR: Ipv6Addr = Ipv6Addr::new(0x2001, 0x4860, 0x4860, 0, 0, 0, 0, 0x8888);
const PROBE_PORT: u16 = 53;

static METADATA: SamplerMetadata = SamplerMetadata {
    id: "ipv6",
    name: "IPv6",
    tokens: &["ip"],
};

/// Local address used to reach `target`, if any route exists
pub fn source_address_towards(target: SocketAddr) -> io::Result<IpAddr> {
    let bind: SocketAddr = match target {
        SocketAddr::V4(_) => (std::net::Ipv4Addr::UNSPECIFIED, 0).into(),
        SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
    };
    let socket = UdpSocket::bind(bind)?;
    socket.connect(target)?;
    Ok(socket.local_addr()?.ip())
}

/// IPv6 sampler
pub struct Ipv6Sampler {
    config: Ipv6Config,
    formatter: TokenFormatter,
}

impl Ipv6Sampler {
    pub fn new(config: Ipv6Config) -> Result<Self> {
        Ok(Self {
            config,
            formatter: TokenFormatter::new(METADATA.tokens)?,
        })
    }

    pub fn create(instance: &ModuleInstance) -> Result<BoxedSampler> {
        let ModuleConfig::Ipv6(config) = &instance.config else {
            bail!("ipv6 sampler created for '{}'", instance.section);
        };
        Ok(Box::new(Self::new(config.clone())?))
    }

    pub fn render(&self, address: Option<IpAddr>) -> Fragment {
        match address {
            Some(ip) => {
                let values = TokenValues::new().with("ip", ip.to_string());
                Fragment::good(self.formatter.render(&self.config.format_up, &values))
            }
            None => Fragment::bad(
                self.formatter
                    .render(&self.config.format_down, &TokenValues::new()),
            ),
        }
    }
}

impl Sampler for Ipv6Sampler {
    fn metadata(&self) -> &SamplerMetadata {
        &METADATA
    }

    fn sample(&mut self, _tick: &TickContext) -> Result<Fragment> {
        let target = SocketAddr::from((PROBE_ADDR, PROBE_PORT));
        let address = match source_address_towards(target) {
            Ok(ip) => Some(ip),
            Err(e) => {
                log::debug!("no IPv6 route: {}", e);
                None
            }
        };
        Ok(self.render(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statline_types::SemanticColor;

    #[test]
    fn test_render_up() {
        let sampler = Ipv6Sampler::new(Ipv6Config::default()).unwrap();
        let ip: IpAddr = "2001:db8::1".parse().unwrap();

        let fragment = sampler.render(Some(ip));
        assert_eq!(fragment.text, "2001:db8::1");
        assert_eq!(fragment.color, SemanticColor::Good);
    }

    #[test]
    fn test_render_down() {
        let sampler = Ipv6Sampler::new(Ipv6Config::default()).unwrap();
        assert_eq!(sampler.render(None), Fragment::bad("no IPv6"));
    }

    #[test]
    fn test_loopback_route() {
        let target = SocketAddr::from((std::net::Ipv4Addr::LOCALHOST, 9));
        if let Ok(ip) = source_address_towards(target) {
            assert!(ip.is_loopback());
        }
    }

    #[test]
    fn test_sample_never_fails() {
        let mut sampler = Ipv6Sampler::new(Ipv6Config::default()).unwrap();
        assert!(sampler.sample(&TickContext::default()).is_ok());
    }
}
