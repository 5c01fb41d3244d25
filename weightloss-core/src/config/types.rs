//! Configuration type definitions

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Default controller tick period
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Global controller settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerSettings {
    /// Sleep between two controller ticks
    pub tick_interval_ms: u64,
    /// Screen shown first, taken modulo the number of screens
    pub default_screen: usize,
    /// Turn every frame upside down before sending it
    pub rotate_screen: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            default_screen: 0,
            rotate_screen: false,
        }
    }
}

/// One screen section of the configuration file
///
/// The section name selects the screen type (`WeightInputScreen2` builds a
/// `WeightInputScreen`); options are a flat string map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScreenSection {
    pub name: String,
    pub options: BTreeMap<String, String>,
}

impl ScreenSection {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            options: BTreeMap::new(),
        }
    }

    /// Builder style option setter
    pub fn with_option(mut self, key: &str, value: &str) -> Self {
        self.options.insert(key.to_string(), value.to_string());
        self
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}
