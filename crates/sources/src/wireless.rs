//! Wireless interface sampler
//!
//! Link quality comes from `/proc/net/wireless`; ESSID and bitrate from the
//! wireless extensions ioctls.

use crate::net;
use anyhow::{anyhow, bail, Result};
use statline_core::{
    BoxedSampler, Fragment, ModuleConfig, ModuleInstance, Sampler, SamplerMetadata, TickContext,
    TokenFormatter, TokenValues,
};
use statline_types::source_configs::WirelessConfig;
use std::net::Ipv4Addr;

const PROC_NET_WIRELESS: &str = "/proc/net/wireless";

/// Upper bound of the link quality most drivers report
const MAX_LINK_QUALITY: f64 = 70.0;

static METADATA: SamplerMetadata = SamplerMetadata {
    id: "wireless",
    name: "Wireless",
    tokens: &["quality", "essid", "bitrate", "ip"],
};

/// Link quality of `interface` (0-100) from `/proc/net/wireless` contents
pub fn parse_link_quality(content: &str, interface: &str) -> Option<u32> {
    content.lines().find_map(|line| {
        let (name, rest) = line.trim_start().split_once(':')?;
        if name != interface {
            return None;
        }
        // status, link, level, noise, ...
        let link: f64 = rest
            .split_whitespace()
            .nth(1)?
            .trim_end_matches('.')
            .parse()
            .ok()?;
        Some((link / MAX_LINK_QUALITY * 100.0).clamp(0.0, 100.0).round() as u32)
    })
}

/// Bitrate as `54 Mb/s`, `866.7 Mb/s`, `1.2 Gb/s`
pub fn format_bitrate(bits_per_second: u64) -> String {
    let rate = bits_per_second as f64;
    if rate >= 1e9 {
        format!("{} Gb/s", rate / 1e9)
    } else if rate >= 1e6 {
        format!("{} Mb/s", rate / 1e6)
    } else {
        format!("{} kb/s", rate / 1e3)
    }
}

#[cfg(target_os = "linux")]
mod wext {
    use std::ffi::c_void;
    use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

    const SIOCGIWESSID: libc::c_ulong = 0x8B1B;
    const SIOCGIWRATE: libc::c_ulong = 0x8B21;
    const IW_ESSID_MAX_SIZE: usize = 32;

    #[repr(C)]
    #[derive(Clone, Copy)]
    struct IwPoint {
        pointer: *mut c_void,
        length: u16,
        flags: u16,
    }

    #[repr(C)]
    #[derive(Clone, Copy)]
    struct IwParam {
        value: i32,
        fixed: u8,
        disabled: u8,
        flags: u16,
    }

    #[repr(C)]
    union IwreqData {
        essid: IwPoint,
        bitrate: IwParam,
        raw: [u8; 16],
    }

    #[repr(C)]
    struct Iwreq {
        ifr_name: [libc::c_char; libc::IFNAMSIZ],
        u: IwreqData,
    }

    impl Iwreq {
        fn new(interface: &str) -> Option<Self> {
            let bytes = interface.as_bytes();
            if bytes.len() >= libc::IFNAMSIZ {
                return None;
            }
            let mut ifr_name = [0 as libc::c_char; libc::IFNAMSIZ];
            for (dst, src) in ifr_name.iter_mut().zip(bytes) {
                *dst = *src as libc::c_char;
            }
            Some(Self {
                ifr_name,
                u: IwreqData { raw: [0; 16] },
            })
        }
    }

    fn socket() -> Option<OwnedFd> {
        let fd = unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM, 0) };
        // SAFETY: a non-negative return is a fresh descriptor we own
        (fd >= 0).then(|| unsafe { OwnedFd::from_raw_fd(fd) })
    }

    fn ioctl(fd: &OwnedFd, request: libc::c_ulong, req: &mut Iwreq) -> bool {
        unsafe { libc::ioctl(fd.as_raw_fd(), request as _, req as *mut Iwreq) >= 0 }
    }

    pub fn essid(interface: &str) -> Option<String> {
        let fd = socket()?;
        let mut buf = [0u8; IW_ESSID_MAX_SIZE + 1];
        let mut req = Iwreq::new(interface)?;
        req.u.essid = IwPoint {
            pointer: buf.as_mut_ptr().cast(),
            length: buf.len() as u16,
            flags: 0,
        };
        if !ioctl(&fd, SIOCGIWESSID, &mut req) {
            return None;
        }
        // SAFETY: the kernel filled in the essid member
        let len = usize::from(unsafe { req.u.essid.length }).min(IW_ESSID_MAX_SIZE);
        let essid = String::from_utf8_lossy(&buf[..len]);
        Some(essid.trim_end_matches('\0').to_string())
    }

    pub fn bitrate(interface: &str) -> Option<u64> {
        let fd = socket()?;
        let mut req = Iwreq::new(interface)?;
        if !ioctl(&fd, SIOCGIWRATE, &mut req) {
            return None;
        }
        // SAFETY: the kernel filled in the bitrate member
        let value = unsafe { req.u.bitrate.value };
        u64::try_from(value).ok()
    }
}

#[cfg(not(target_os = "linux"))]
mod wext {
    pub fn essid(_interface: &str) -> Option<String> {
        None
    }

    pub fn bitrate(_interface: &str) -> Option<u64> {
        None
    }
}

/// State of a wireless link for one tick
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WirelessStatus {
    pub quality: Option<u32>,
    pub essid: Option<String>,
    /// bit/s
    pub bitrate: Option<u64>,
    pub ip: Option<Ipv4Addr>,
}

impl WirelessStatus {
    pub fn is_up(&self) -> bool {
        self.ip.is_some()
    }

    pub fn values(&self) -> TokenValues {
        TokenValues::new()
            .with(
                "quality",
                self.quality
                    .map(|q| format!("{:03}%", q))
                    .unwrap_or_else(|| "?".to_string()),
            )
            .with("essid", self.essid.clone().unwrap_or_else(|| "?".to_string()))
            .with(
                "bitrate",
                self.bitrate
                    .map(format_bitrate)
                    .unwrap_or_else(|| "?".to_string()),
            )
            .with("ip", self.ip.map(|ip| ip.to_string()).unwrap_or_default())
    }
}

/// Wireless sampler
pub struct WirelessSampler {
    interface: String,
    config: WirelessConfig,
    formatter: TokenFormatter,
}

impl WirelessSampler {
    pub fn new(interface: &str, config: WirelessConfig) -> Result<Self> {
        Ok(Self {
            interface: interface.to_string(),
            config,
            formatter: TokenFormatter::new(METADATA.tokens)?,
        })
    }

    pub fn create(instance: &ModuleInstance) -> Result<BoxedSampler> {
        let ModuleConfig::Wireless(config) = &instance.config else {
            bail!("wireless sampler created for '{}'", instance.section);
        };
        let interface = instance
            .title()
            .ok_or_else(|| anyhow!("wireless needs an interface name as title"))?;
        Ok(Box::new(Self::new(interface, config.clone())?))
    }

    pub fn render(&self, status: &WirelessStatus) -> Fragment {
        if status.is_up() {
            Fragment::good(
                self.formatter
                    .render(&self.config.format_up, &status.values()),
            )
        } else {
            Fragment::bad(
                self.formatter
                    .render(&self.config.format_down, &status.values()),
            )
        }
    }

    fn status(&self) -> WirelessStatus {
        let ip = net::lookup_ipv4(&self.interface);
        if ip.is_none() {
            return WirelessStatus::default();
        }

        let quality = std::fs::read_to_string(PROC_NET_WIRELESS)
            .ok()
            .and_then(|content| parse_link_quality(&content, &self.interface));

        WirelessStatus {
            quality,
            essid: wext::essid(&self.interface),
            bitrate: wext::bitrate(&self.interface),
            ip,
        }
    }
}

impl Sampler for WirelessSampler {
    fn metadata(&self) -> &SamplerMetadata {
        &METADATA
    }

    fn sample(&mut self, _tick: &TickContext) -> Result<Fragment> {
        Ok(self.render(&self.status()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statline_types::SemanticColor;

    const PROC: &str = "\
Inter-| sta-|   Quality        |   Discarded packets               | Missed | WE
 face | tus | link level noise |  nwid  crypt   frag  retry   misc | beacon | 22
 wlan0: 0000   56.  -54.  -256        0      0      0      0     12        0
";

    #[test]
    fn test_parse_link_quality() {
        assert_eq!(parse_link_quality(PROC, "wlan0"), Some(80));
        assert_eq!(parse_link_quality(PROC, "wlan1"), None);
    }

    #[test]
    fn test_format_bitrate() {
        assert_eq!(format_bitrate(54_000_000), "54 Mb/s");
        assert_eq!(format_bitrate(866_700_000), "866.7 Mb/s");
        assert_eq!(format_bitrate(1_500_000_000), "1.5 Gb/s");
        assert_eq!(format_bitrate(500_000), "500 kb/s");
    }

    #[test]
    fn test_render_up() {
        let sampler = WirelessSampler::new("wlan0", WirelessConfig::default()).unwrap();
        let status = WirelessStatus {
            quality: Some(80),
            essid: Some("home".to_string()),
            bitrate: Some(54_000_000),
            ip: Some(Ipv4Addr::new(192, 168, 0, 7)),
        };

        let fragment = sampler.render(&status);
        assert_eq!(fragment.text, "W: (080% at home, 54 Mb/s) 192.168.0.7");
        assert_eq!(fragment.color, SemanticColor::Good);
    }

    #[test]
    fn test_render_down() {
        let sampler = WirelessSampler::new("wlan0", WirelessConfig::default()).unwrap();
        assert_eq!(
            sampler.render(&WirelessStatus::default()),
            Fragment::bad("W: down")
        );
    }

    #[test]
    fn test_missing_interface_is_down() {
        let mut sampler =
            WirelessSampler::new("statline-none0", WirelessConfig::default()).unwrap();
        let fragment = sampler.sample(&TickContext::default()).unwrap();
        assert_eq!(fragment.color, SemanticColor::Bad);
    }
}
