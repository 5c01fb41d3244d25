//! TOML configuration
//!
//! The `[weightloss_gadget]` table holds global settings. Every other table
//! is a screen section, kept in file order.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Deserialize;

use weightloss_core::{ControllerSettings, ScreenSection};

/// Embedded default configuration
pub const EMBEDDED_CONFIG: &str = include_str!("../../weightloss.toml");

/// Name of the global settings table
pub const GLOBAL_SECTION: &str = "weightloss_gadget";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("[{section}] is not a table")]
    NotATable { section: String },
    #[error("[{section}] option `{option}` must be a string, number or boolean")]
    UnsupportedValue { section: String, option: String },
}

/// Which frontend renders the frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FrontendKind {
    /// Half-block preview in the controlling terminal
    #[default]
    Terminal,
    /// Frames and LED colors go to the log
    Headless,
}

/// Where weather screens get their data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherSourceKind {
    OpenWeatherMap,
    /// Fixed conditions, no network access
    #[default]
    Offline,
}

/// Global settings from `[weightloss_gadget]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GadgetSettings {
    pub frontend: FrontendKind,
    pub rotate_screen: bool,
    pub tick_interval_ms: u64,
    pub default_screen: usize,
    /// Weight log file, relative to the working directory
    pub weight_log: PathBuf,
    pub weather_source: WeatherSourceKind,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for GadgetSettings {
    fn default() -> Self {
        let controller = ControllerSettings::default();
        Self {
            frontend: FrontendKind::default(),
            rotate_screen: controller.rotate_screen,
            tick_interval_ms: controller.tick_interval_ms,
            default_screen: controller.default_screen,
            weight_log: PathBuf::from("weights.toml"),
            weather_source: WeatherSourceKind::default(),
            log_level: "info".to_string(),
        }
    }
}

/// Parsed configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    pub gadget: GadgetSettings,
    /// Screen sections in file order
    pub screens: Vec<ScreenSection>,
}

impl TrackerConfig {
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            tick_interval_ms: self.gadget.tick_interval_ms,
            default_screen: self.gadget.default_screen,
            rotate_screen: self.gadget.rotate_screen,
        }
    }
}

/// Load `path`, or the embedded configuration when no path is given
pub fn load_config(path: Option<&Path>) -> Result<TrackerConfig, ConfigError> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_config(&text)
        }
        None => parse_config(EMBEDDED_CONFIG),
    }
}

/// Parse configuration text
pub fn parse_config(text: &str) -> Result<TrackerConfig, ConfigError> {
    let table: toml::Table = text.parse()?;

    let mut gadget = None;
    let mut screens = Vec::new();
    for (name, value) in table {
        let toml::Value::Table(options) = value else {
            return Err(ConfigError::NotATable { section: name });
        };
        if name == GLOBAL_SECTION {
            gadget = Some(toml::Value::Table(options).try_into::<GadgetSettings>()?);
        } else {
            screens.push(screen_section(name, options)?);
        }
    }

    let gadget = gadget.unwrap_or_else(|| {
        warn!("no [{}] section, using defaults", GLOBAL_SECTION);
        GadgetSettings::default()
    });
    info!("{} screen sections configured", screens.len());
    Ok(TrackerConfig { gadget, screens })
}

fn screen_section(name: String, options: toml::Table) -> Result<ScreenSection, ConfigError> {
    let mut flat = BTreeMap::new();
    for (option, value) in options {
        let text = match value {
            toml::Value::String(s) => s,
            toml::Value::Integer(i) => i.to_string(),
            toml::Value::Float(f) => f.to_string(),
            toml::Value::Boolean(b) => b.to_string(),
            _ => {
                return Err(ConfigError::UnsupportedValue {
                    section: name,
                    option,
                })
            }
        };
        flat.insert(option, text);
    }
    debug!("[{}] {:?}", name, flat);
    Ok(ScreenSection {
        name,
        options: flat,
    })
}
