//! Application configuration

use super::parser::{self, RawConfig, RawSection};
use super::ConfigError;
use serde_json::Value;
use statline_types::{
    GeneralConfig, HexColor, ModuleConfig, ModuleInstance, ModuleKind, SectionRef,
};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

const GENERAL_SECTION: &str = "general";
const ORDER_OPTION: &str = "order";
const COLOR_OPTIONS: [&str; 4] = ["color_good", "color_degraded", "color_bad", "color_separator"];

/// Application-wide configuration, built once at startup and then only read
#[derive(Debug, Clone)]
pub struct AppConfig {
    general: GeneralConfig,
    /// One instance per `order` entry, in display order
    sections: Vec<ModuleInstance>,
    /// Every module section defined in the file
    defined: HashMap<SectionRef, ModuleConfig>,
}

impl AppConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = content.parse()?;
        log::info!(
            "Loaded {} with {} modules",
            path.display(),
            config.sections.len()
        );
        Ok(config)
    }

    /// Interpret a parsed configuration tree
    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let order_line = raw.option_lines.get(ORDER_OPTION).copied().unwrap_or(0);
        for name in raw.options.keys() {
            if name != ORDER_OPTION {
                return Err(ConfigError::UnknownOption {
                    line: raw.option_lines.get(name).copied().unwrap_or(0),
                    name: name.clone(),
                });
            }
        }

        let mut general = None;
        let mut defined = HashMap::new();
        for section in &raw.sections {
            if section.name == GENERAL_SECTION {
                if general.is_some() {
                    return Err(ConfigError::DuplicateSection {
                        line: section.line,
                        section: GENERAL_SECTION.to_string(),
                    });
                }
                general = Some(general_config(section)?);
                continue;
            }

            let (section_ref, config) = module_config(section)?;
            if defined.contains_key(&section_ref) {
                return Err(ConfigError::DuplicateSection {
                    line: section.line,
                    section: section_ref.to_string(),
                });
            }
            defined.insert(section_ref, config);
        }

        let general = general.unwrap_or_default();
        if general.interval == 0 {
            return Err(ConfigError::InvalidInterval);
        }

        let order = order_entries(raw.options.get(ORDER_OPTION))?;
        if order.is_empty() {
            return Err(ConfigError::EmptyOrder);
        }

        let mut sections = Vec::with_capacity(order.len());
        for entry in order {
            let section_ref = SectionRef::parse(entry).map_err(|source| ConfigError::Section {
                line: order_line,
                source,
            })?;
            let config = match defined.get(&section_ref) {
                Some(config) => config.clone(),
                None => {
                    log::debug!("No section for '{}', using defaults", section_ref);
                    ModuleConfig::default_for(section_ref.kind)
                }
            };
            validate_module(&section_ref, &config)?;
            sections.push(ModuleInstance::new(section_ref, config));
        }

        for section_ref in defined.keys() {
            if !sections.iter().any(|s| &s.section == section_ref) {
                log::debug!("Section '{}' is not in 'order', ignoring it", section_ref);
            }
        }

        Ok(Self {
            general,
            sections,
            defined,
        })
    }

    pub fn general(&self) -> &GeneralConfig {
        &self.general
    }

    /// Modules to display, in order; never empty
    pub fn ordered_sections(&self) -> &[ModuleInstance] {
        &self.sections
    }

    /// Resolved options of one module instance, defaults if it has no section
    pub fn options_for(&self, kind: ModuleKind, title: Option<&str>) -> ModuleConfig {
        SectionRef::new(kind, title)
            .ok()
            .and_then(|section| self.defined.get(&section).cloned())
            .unwrap_or_else(|| ModuleConfig::default_for(kind))
    }
}

impl FromStr for AppConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Self::from_raw(parser::parse(content)?)
    }
}

fn general_config(section: &RawSection) -> Result<GeneralConfig, ConfigError> {
    if let Some(title) = &section.title {
        return Err(ConfigError::Syntax {
            line: section.line,
            message: format!("section 'general' does not take a title, got {:?}", title),
        });
    }

    // Checked ahead of deserialization for a clearer message than serde's
    for option in COLOR_OPTIONS {
        if let Some(Value::String(color)) = section.options.get(option) {
            HexColor::parse(color).map_err(|source| ConfigError::InvalidColor {
                line: section.line,
                option: option.to_string(),
                source,
            })?;
        }
    }

    serde_json::from_value(Value::Object(section.options.clone())).map_err(|source| {
        ConfigError::InvalidOptions {
            line: section.line,
            section: GENERAL_SECTION.to_string(),
            source,
        }
    })
}

fn module_config(section: &RawSection) -> Result<(SectionRef, ModuleConfig), ConfigError> {
    let kind: ModuleKind = section
        .name
        .parse()
        .map_err(|_| ConfigError::UnknownSection {
            line: section.line,
            name: section.name.clone(),
        })?;

    let section_ref = SectionRef::new(kind, section.title.as_deref()).map_err(|source| {
        ConfigError::Section {
            line: section.line,
            source,
        }
    })?;

    let config = ModuleConfig::from_options(kind, &section.options).map_err(|source| {
        ConfigError::InvalidOptions {
            line: section.line,
            section: section_ref.to_string(),
            source,
        }
    })?;

    Ok((section_ref, config))
}

fn order_entries(value: Option<&Value>) -> Result<Vec<&str>, ConfigError> {
    match value {
        None => Ok(Vec::new()),
        Some(Value::String(entry)) => Ok(vec![entry.as_str()]),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().ok_or(ConfigError::InvalidOrder))
            .collect(),
        Some(_) => Err(ConfigError::InvalidOrder),
    }
}

/// Checks that need more than the option types
fn validate_module(section: &SectionRef, config: &ModuleConfig) -> Result<(), ConfigError> {
    if let ModuleConfig::Time(time) = config {
        statline_sources::validate_time_format(&time.format).map_err(|e| {
            ConfigError::InvalidTimeFormat {
                section: section.to_string(),
                message: e.to_string(),
            }
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use statline_types::source_configs::{BatteryConfig, DiskConfig};
    use statline_types::OutputFormat;
    use std::io::Write;

    const SAMPLE: &str = r#"
general {
    output_format = "dzen2"
    colors = true
    interval = 5
}

order += "ipv6"
order += "disk /"
order += "battery 0"
order += "load"
order += "time"

battery 0 {
    format = "%status %percentage"
    last_full_capacity = true
}

disk "/" {
    format = "%avail"
}

time {
    format = "%Y-%m-%d %H:%M:%S"
}
"#;

    #[test]
    fn test_sample_configuration() {
        let config: AppConfig = SAMPLE.parse().unwrap();

        assert_eq!(config.general().output_format, OutputFormat::Dzen2);
        assert!(config.general().colors);
        assert_eq!(config.general().interval, 5);

        let kinds: Vec<ModuleKind> = config.ordered_sections().iter().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ModuleKind::Ipv6,
                ModuleKind::Disk,
                ModuleKind::Battery,
                ModuleKind::Load,
                ModuleKind::Time
            ]
        );
        assert_eq!(config.ordered_sections()[1].title(), Some("/"));

        assert_eq!(
            config.options_for(ModuleKind::Disk, Some("/")),
            ModuleConfig::Disk(DiskConfig {
                format: "%avail".to_string()
            })
        );
        assert_eq!(
            config.options_for(ModuleKind::Battery, Some("0")),
            ModuleConfig::Battery(BatteryConfig {
                format: "%status %percentage".to_string(),
                last_full_capacity: true,
                ..BatteryConfig::default()
            })
        );
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AppConfig = "order += \"load\"\norder += \"disk /home\"".parse().unwrap();

        assert_eq!(*config.general(), GeneralConfig::default());
        assert_eq!(
            config.ordered_sections()[1].config,
            ModuleConfig::default_for(ModuleKind::Disk)
        );
        assert_eq!(
            config.options_for(ModuleKind::Volume, Some("master")),
            ModuleConfig::default_for(ModuleKind::Volume)
        );
    }

    #[test]
    fn test_empty_order_is_fatal() {
        let err = "general { colors = false }".parse::<AppConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::EmptyOrder));

        let err = "order = {}".parse::<AppConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::EmptyOrder));
    }

    #[test]
    fn test_invalid_color_is_fatal() {
        let err = "general {\n color_bad = \"red\"\n}\norder += \"load\""
            .parse::<AppConfig>()
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidColor { line: 1, ref option, .. } if option == "color_bad"),
            "{err}"
        );
    }

    #[test]
    fn test_unknown_section_is_fatal() {
        let err = "order += \"load\"\n\ncpu_frequency { }"
            .parse::<AppConfig>()
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::UnknownSection { line: 3, ref name } if name == "cpu_frequency"),
            "{err}"
        );
    }

    #[test]
    fn test_unknown_order_entry_is_fatal() {
        let err = "order += \"load\"\norder += \"wifi wlan0\""
            .parse::<AppConfig>()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Section { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_unknown_option_is_fatal() {
        let err = "order += \"load\"\nload { fromat = \"%1min\" }"
            .parse::<AppConfig>()
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidOptions { line: 2, .. }),
            "{err}"
        );

        let err = "order += \"load\"\nrefresh = 3".parse::<AppConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOption { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_mistyped_value_is_fatal() {
        let err = "order += \"load\"\ngeneral { interval = \"soon\" }"
            .parse::<AppConfig>()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOptions { .. }), "{err}");
    }

    #[test]
    fn test_zero_interval_is_fatal() {
        let err = "order += \"load\"\ngeneral { interval = 0 }"
            .parse::<AppConfig>()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInterval));
    }

    #[test]
    fn test_titles() {
        let err = "order += \"disk\"".parse::<AppConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::Section { .. }), "{err}");

        let err = "order += \"load\"\nload 1 { }".parse::<AppConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::Section { line: 2, .. }), "{err}");

        let config: AppConfig = "order += \"volume\"".parse().unwrap();
        assert_eq!(config.ordered_sections()[0].title(), None);
    }

    #[test]
    fn test_duplicate_section_is_fatal() {
        let err = "order += \"disk /\"\ndisk / { }\ndisk / { }"
            .parse::<AppConfig>()
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::DuplicateSection { line: 3, .. }),
            "{err}"
        );
    }

    #[test]
    fn test_invalid_time_format_is_fatal() {
        let err = "order += \"time\"\ntime { format = \"%Q\" }"
            .parse::<AppConfig>()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeFormat { .. }), "{err}");
    }

    #[test]
    fn test_single_string_order() {
        let config: AppConfig = "order = \"time\"".parse().unwrap();
        assert_eq!(config.ordered_sections().len(), 1);

        let err = "order = 5".parse::<AppConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOrder));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.ordered_sections().len(), 5);
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/statline.conf")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
