//! Network source configuration types (`ipv6`, `wireless`, `ethernet`).

use serde::{Deserialize, Serialize};

fn default_ipv6_format_up() -> String {
    "%ip".to_string()
}

fn default_ipv6_format_down() -> String {
    "no IPv6".to_string()
}

fn default_wireless_format_up() -> String {
    "W: (%quality at %essid, %bitrate) %ip".to_string()
}

fn default_wireless_format_down() -> String {
    "W: down".to_string()
}

fn default_ethernet_format_up() -> String {
    "E: %ip (%speed)".to_string()
}

fn default_ethernet_format_down() -> String {
    "E: down".to_string()
}

/// `ipv6 { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ipv6Config {
    #[serde(default = "default_ipv6_format_up")]
    pub format_up: String,
    #[serde(default = "default_ipv6_format_down")]
    pub format_down: String,
}

impl Default for Ipv6Config {
    fn default() -> Self {
        Self {
            format_up: default_ipv6_format_up(),
            format_down: default_ipv6_format_down(),
        }
    }
}

/// `wireless <interface> { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WirelessConfig {
    #[serde(default = "default_wireless_format_up")]
    pub format_up: String,
    #[serde(default = "default_wireless_format_down")]
    pub format_down: String,
}

impl Default for WirelessConfig {
    fn default() -> Self {
        Self {
            format_up: default_wireless_format_up(),
            format_down: default_wireless_format_down(),
        }
    }
}

/// `ethernet <interface> { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EthernetConfig {
    #[serde(default = "default_ethernet_format_up")]
    pub format_up: String,
    #[serde(default = "default_ethernet_format_down")]
    pub format_down: String,
}

impl Default for EthernetConfig {
    fn default() -> Self {
        Self {
            format_up: default_ethernet_format_up(),
            format_down: default_ethernet_format_down(),
        }
    }
}
