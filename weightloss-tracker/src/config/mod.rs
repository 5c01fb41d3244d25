//! Configuration loading and parsing
//!
//! Loads the TOML configuration from a file or the embedded defaults.

pub mod loader;

pub use loader::{
    load_config, parse_config, ConfigError, FrontendKind, GadgetSettings, TrackerConfig,
    WeatherSourceKind, EMBEDDED_CONFIG, GLOBAL_SECTION,
};
