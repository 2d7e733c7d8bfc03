//! Configuration file discovery and loading
//!
//! Settings are resolved from several sources, highest priority first:
//! 1. CLI arguments
//! 2. Environment variables
//! 3. Config file (searched in standard locations)
//! 4. Built-in defaults

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::de::DeserializeOwned;

use crate::APP_NAME;

/// Where a configuration file was found
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Path given on the command line or through the config env var
    Explicit(PathBuf),
    /// Found in the working directory
    CurrentDir(PathBuf),
    /// Found under $XDG_CONFIG_HOME/climate-api/
    XdgConfig(PathBuf),
    /// Found under /etc/climate-api/
    System(PathBuf),
    /// Nothing found, built-in defaults apply
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ConfigSource::Explicit(p)
            | ConfigSource::CurrentDir(p)
            | ConfigSource::XdgConfig(p)
            | ConfigSource::System(p) => Some(p),
            ConfigSource::Defaults => None,
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.path() {
            Some(p) => write!(f, "{}", p.display()),
            None => write!(f, "(defaults)"),
        }
    }
}

/// Find a configuration file in the standard locations
///
/// Search order:
/// 1. `env_var` (e.g. CLIMATE_API_CONFIG) when it points at an existing file
/// 2. `filename` in the current directory
/// 3. $XDG_CONFIG_HOME/climate-api/ (or ~/.config/climate-api/)
/// 4. /etc/climate-api/
pub fn find_config_file(env_var: &str, filename: &str) -> ConfigSource {
    if let Ok(path) = env::var(env_var) {
        let p = PathBuf::from(&path);
        if p.exists() {
            return ConfigSource::Explicit(p);
        }
    }

    let local = PathBuf::from(filename);
    if local.exists() {
        return ConfigSource::CurrentDir(local);
    }

    let xdg_path = get_xdg_config_dir().join(filename);
    if xdg_path.exists() {
        return ConfigSource::XdgConfig(xdg_path);
    }

    let system = PathBuf::from(format!("/etc/{}/{}", APP_NAME, filename));
    if system.exists() {
        return ConfigSource::System(system);
    }

    ConfigSource::Defaults
}

fn get_xdg_config_dir() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// XDG data directory for the application, used as the fallback dataset location
pub fn get_xdg_data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share")
}

fn xdg_dir(env_var: &str, home_relative: &str) -> PathBuf {
    if let Ok(base) = env::var(env_var) {
        PathBuf::from(base).join(APP_NAME)
    } else if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(home_relative).join(APP_NAME)
    } else {
        PathBuf::from(home_relative).join(APP_NAME)
    }
}

/// Load and parse a TOML configuration file
///
/// Returns `T::default()` for [`ConfigSource::Defaults`], an error when the
/// file cannot be read or does not parse.
pub fn load_config<T: DeserializeOwned + Default>(source: &ConfigSource) -> anyhow::Result<T> {
    match source.path() {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            let config: T = toml::from_str(&content)
                .with_context(|| format!("failed to parse config file {}", path.display()))?;
            Ok(config)
        }
        None => Ok(T::default()),
    }
}
