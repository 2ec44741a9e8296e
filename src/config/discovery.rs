//! Configuration file discovery

use super::ConfigError;
use std::path::{Path, PathBuf};

/// Search order for the configuration file; the first existing one wins.
///
/// `~` is the home directory, `$XDG_CONFIG_HOME` defaults to `~/.config` and
/// `$XDG_CONFIG_DIRS` is a `:`-separated list defaulting to `/etc/xdg`.
pub const CONFIG_CANDIDATES: &[&str] = &[
    "~/.i3status.conf",
    "$XDG_CONFIG_HOME/i3status/config",
    "/etc/i3status.conf",
    "$XDG_CONFIG_DIRS/i3status/config",
];

const XDG_CONFIG_HOME_DEFAULT: &str = "~/.config";
const XDG_CONFIG_DIRS_DEFAULT: &str = "/etc/xdg";

/// Replace a leading `~` with the home directory. Without a home directory
/// such paths cannot be resolved.
pub fn expand_tilde(path: &str, home: Option<&Path>) -> Option<PathBuf> {
    match path.strip_prefix('~') {
        Some("") => home.map(Path::to_path_buf),
        Some(rest) if rest.starts_with('/') => {
            home.map(|home| home.join(rest.trim_start_matches('/')))
        }
        _ => Some(PathBuf::from(path)),
    }
}

fn env_or<E>(env: &E, key: &str, default: &str) -> String
where
    E: Fn(&str) -> Option<String>,
{
    env(key)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Expand one candidate template into concrete paths
pub fn expand_candidate<E>(template: &str, env: &E, home: Option<&Path>) -> Vec<PathBuf>
where
    E: Fn(&str) -> Option<String>,
{
    let expanded: Vec<String> = if let Some(rest) = template.strip_prefix("$XDG_CONFIG_HOME") {
        vec![format!(
            "{}{}",
            env_or(env, "XDG_CONFIG_HOME", XDG_CONFIG_HOME_DEFAULT),
            rest
        )]
    } else if let Some(rest) = template.strip_prefix("$XDG_CONFIG_DIRS") {
        env_or(env, "XDG_CONFIG_DIRS", XDG_CONFIG_DIRS_DEFAULT)
            .split(':')
            .filter(|dir| !dir.is_empty())
            .map(|dir| format!("{}{}", dir, rest))
            .collect()
    } else {
        vec![template.to_string()]
    };

    expanded
        .iter()
        .filter_map(|path| expand_tilde(path, home))
        .collect()
}

/// First candidate that exists.
///
/// Environment lookup, home directory and the existence check are injected so
/// the search order can be exercised without touching the real filesystem.
pub fn resolve_config_path<E, X>(
    candidates: &[&str],
    env: E,
    home: Option<&Path>,
    exists: X,
) -> Result<PathBuf, ConfigError>
where
    E: Fn(&str) -> Option<String>,
    X: Fn(&Path) -> bool,
{
    let mut searched = Vec::new();
    for template in candidates {
        for path in expand_candidate(template, &env, home) {
            if exists(&path) {
                log::debug!("Using configuration {}", path.display());
                return Ok(path);
            }
            searched.push(path);
        }
    }
    Err(ConfigError::NotFound { searched })
}

/// Home directory of the current user
pub fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Find the configuration file of the current user
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let home = home_dir();
    resolve_config_path(
        CONFIG_CANDIDATES,
        |key| std::env::var(key).ok(),
        home.as_deref(),
        Path::is_file,
    )
}
