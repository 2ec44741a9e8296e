//! Module kinds and `order` entries

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::source_configs::ModuleConfig;
use std::str::FromStr;
use thiserror::Error;

/// Every category of status information statline knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    Ipv6,
    Wireless,
    Ethernet,
    Battery,
    RunWatch,
    Disk,
    Load,
    Time,
    Ddate,
    Volume,
    CpuTemperature,
    CpuUsage,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 12] = [
        ModuleKind::Ipv6,
        ModuleKind::Wireless,
        ModuleKind::Ethernet,
        ModuleKind::Battery,
        ModuleKind::RunWatch,
        ModuleKind::Disk,
        ModuleKind::Load,
        ModuleKind::Time,
        ModuleKind::Ddate,
        ModuleKind::Volume,
        ModuleKind::CpuTemperature,
        ModuleKind::CpuUsage,
    ];

    /// Section name used in the configuration file
    pub fn name(&self) -> &'static str {
        match self {
            ModuleKind::Ipv6 => "ipv6",
            ModuleKind::Wireless => "wireless",
            ModuleKind::Ethernet => "ethernet",
            ModuleKind::Battery => "battery",
            ModuleKind::RunWatch => "run_watch",
            ModuleKind::Disk => "disk",
            ModuleKind::Load => "load",
            ModuleKind::Time => "time",
            ModuleKind::Ddate => "ddate",
            ModuleKind::Volume => "volume",
            ModuleKind::CpuTemperature => "cpu_temperature",
            ModuleKind::CpuUsage => "cpu_usage",
        }
    }

    /// Whether several titled instances of this kind may exist
    pub fn is_titled(&self) -> bool {
        matches!(
            self,
            ModuleKind::Wireless
                | ModuleKind::Ethernet
                | ModuleKind::Battery
                | ModuleKind::RunWatch
                | ModuleKind::Disk
                | ModuleKind::Volume
                | ModuleKind::CpuTemperature
        )
    }

    /// Whether the title names the device to sample and therefore cannot be omitted.
    /// Volume titles are only labels.
    pub fn requires_title(&self) -> bool {
        self.is_titled() && *self != ModuleKind::Volume
    }
}

impl FromStr for ModuleKind {
    type Err = SectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModuleKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SectionError::UnknownKind(s.to_string()))
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionError {
    #[error("empty entry in 'order'")]
    Empty,
    #[error("unknown module {0:?}")]
    UnknownKind(String),
    #[error("module '{0}' needs a title (e.g. \"{0} <name>\")")]
    MissingTitle(ModuleKind),
    #[error("module '{0}' does not take a title, got {1:?}")]
    UnexpectedTitle(ModuleKind, String),
}

/// One `(kind, optional title)` entry of the `order` list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionRef {
    pub kind: ModuleKind,
    pub title: Option<String>,
}

impl SectionRef {
    pub fn new(kind: ModuleKind, title: Option<&str>) -> Result<Self, SectionError> {
        let title = title.map(str::trim).filter(|t| !t.is_empty());
        match title {
            None if kind.requires_title() => Err(SectionError::MissingTitle(kind)),
            Some(title) if !kind.is_titled() => {
                Err(SectionError::UnexpectedTitle(kind, title.to_string()))
            }
            _ => Ok(Self {
                kind,
                title: title.map(str::to_string),
            }),
        }
    }

    /// Parse an `order` entry such as `"load"` or `"disk /home"`.
    ///
    /// The kind ends at the first whitespace; everything after it is the title.
    pub fn parse(entry: &str) -> Result<Self, SectionError> {
        let entry = entry.trim();
        if entry.is_empty() {
            return Err(SectionError::Empty);
        }

        let (kind, title) = match entry.split_once(char::is_whitespace) {
            Some((kind, title)) => (kind, Some(title)),
            None => (entry, None),
        };

        Self::new(kind.parse()?, title)
    }
}

impl fmt::Display for SectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "{} {}", self.kind, title),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// One entry of `order` together with its resolved options
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleInstance {
    pub section: SectionRef,
    pub config: ModuleConfig,
}

impl ModuleInstance {
    pub fn new(section: SectionRef, config: ModuleConfig) -> Self {
        debug_assert_eq!(section.kind, config.kind());
        Self { section, config }
    }

    pub fn kind(&self) -> ModuleKind {
        self.section.kind
    }

    pub fn title(&self) -> Option<&str> {
        self.section.title.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in ModuleKind::ALL {
            assert_eq!(kind.name().parse::<ModuleKind>(), Ok(kind));
        }
        assert_eq!("CPU_Usage".parse::<ModuleKind>(), Ok(ModuleKind::CpuUsage));
    }

    #[test]
    fn test_parse_plain_entry() {
        let section = SectionRef::parse("load").unwrap();
        assert_eq!(section.kind, ModuleKind::Load);
        assert_eq!(section.title, None);
    }

    #[test]
    fn test_parse_titled_entry_keeps_spaces_in_title() {
        let section = SectionRef::parse("disk /mnt/my disk").unwrap();
        assert_eq!(section.kind, ModuleKind::Disk);
        assert_eq!(section.title.as_deref(), Some("/mnt/my disk"));
        assert_eq!(section.to_string(), "disk /mnt/my disk");
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert_eq!(
            SectionRef::parse("weather berlin"),
            Err(SectionError::UnknownKind("weather".to_string()))
        );
    }

    #[test]
    fn test_title_rules() {
        assert_eq!(
            SectionRef::parse("battery"),
            Err(SectionError::MissingTitle(ModuleKind::Battery))
        );
        assert_eq!(
            SectionRef::parse("time utc"),
            Err(SectionError::UnexpectedTitle(ModuleKind::Time, "utc".to_string()))
        );
        assert!(SectionRef::parse("volume").is_ok());
        assert_eq!(SectionRef::parse("  "), Err(SectionError::Empty));
    }
}
