//! Network interface helpers shared by the ethernet and wireless samplers

use std::ffi::CStr;
use std::io;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

/// Network interface base path
const SYS_CLASS_NET: &str = "/sys/class/net";

/// Sysfs directory of an interface
pub fn interface_dir(interface: &str) -> PathBuf {
    Path::new(SYS_CLASS_NET).join(interface)
}

/// First IPv4 address assigned to `interface`
pub fn interface_ipv4(interface: &str) -> io::Result<Option<Ipv4Addr>> {
    let mut addrs: *mut libc::ifaddrs = std::ptr::null_mut();
    if unsafe { libc::getifaddrs(&mut addrs) } != 0 {
        return Err(io::Error::last_os_error());
    }

    let mut found = None;
    let mut cursor = addrs;
    while !cursor.is_null() {
        // SAFETY: getifaddrs returned a valid list that lives until freeifaddrs
        let entry = unsafe { &*cursor };
        cursor = entry.ifa_next;

        if entry.ifa_addr.is_null() || entry.ifa_name.is_null() {
            continue;
        }
        let name = unsafe { CStr::from_ptr(entry.ifa_name) };
        if name.to_bytes() != interface.as_bytes() {
            continue;
        }
        let family = unsafe { (*entry.ifa_addr).sa_family };
        if i32::from(family) != libc::AF_INET {
            continue;
        }

        let sin = unsafe { &*(entry.ifa_addr as *const libc::sockaddr_in) };
        found = Some(Ipv4Addr::from(u32::from_be(sin.sin_addr.s_addr)));
        break;
    }

    unsafe { libc::freeifaddrs(addrs) };
    Ok(found)
}

/// IPv4 address of an interface, logging lookup failures
pub fn lookup_ipv4(interface: &str) -> Option<Ipv4Addr> {
    interface_ipv4(interface).unwrap_or_else(|e| {
        log::debug!("getifaddrs failed: {}", e);
        None
    })
}

/// Kernel operational state (`up`, `down`, `unknown`, ...)
pub fn operstate(dir: &Path) -> Option<String> {
    std::fs::read_to_string(dir.join("operstate"))
        .ok()
        .map(|s| s.trim().to_lowercase())
}

/// Negotiated link speed in Mbit/s; drivers report -1 when unknown
pub fn link_speed(dir: &Path) -> Option<u32> {
    std::fs::read_to_string(dir.join("speed"))
        .ok()?
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|speed| u32::try_from(speed).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_interface_has_no_address() {
        assert_eq!(interface_ipv4("statline-none0").unwrap(), None);
    }

    #[test]
    fn test_loopback_address() {
        // Minimal sandboxes may run without loopback configured
        if let Some(ip) = interface_ipv4("lo").unwrap() {
            assert!(ip.is_loopback());
        }
    }

    #[test]
    fn test_sysfs_attributes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("operstate"), "up\n").unwrap();
        std::fs::write(dir.path().join("speed"), "1000\n").unwrap();

        assert_eq!(operstate(dir.path()).as_deref(), Some("up"));
        assert_eq!(link_speed(dir.path()), Some(1000));

        std::fs::write(dir.path().join("speed"), "-1\n").unwrap();
        assert_eq!(link_speed(dir.path()), None);
    }

    #[test]
    fn test_missing_sysfs_attributes() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(operstate(dir.path()), None);
        assert_eq!(link_speed(dir.path()), None);
    }
}
