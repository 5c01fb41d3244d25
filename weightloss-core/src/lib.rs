//! Board-agnostic core logic for the weightloss tracker
//!
//! This crate contains everything the controller needs that does not depend
//! on a concrete frontend, network stack or file system:
//!
//! - Collaborator traits (clock, host info, weather, weight store)
//! - Screens and their redraw cadences
//! - LED patterns
//! - Screen registry (configuration section to screen)
//! - Controller state machine
//! - Trend math for the weight log
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod controller;
pub mod led;
pub mod registry;
pub mod screens;
pub mod traits;
pub mod trend;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ControllerSettings, ScreenSection};
pub use controller::{Controller, ControllerError, Flow};
pub use led::{LedPattern, LedPatternKind, RedBlinkingPattern};
pub use registry::{build_screens, BuildError, Collaborators, ScreenKind};
pub use screens::{InputCapable, Screen};
pub use traits::{
    to_tenth_kg, Clock, CollaboratorError, HostInfo, LastUpdates, MemoryWeightStore,
    WeatherQuery, WeatherSnapshot, WeatherSource, WeightEntry, WeightStore,
};
