//! Collaborator traits
//!
//! These traits define the interface between the screens and the outside
//! world. The tracker binary provides the real implementations; tests use
//! in-memory fakes.

pub mod clock;
pub mod host;
pub mod weather;
pub mod weight_store;

use alloc::string::String;

pub use clock::{Clock, SharedClock};
pub use host::{HostInfo, SharedHostInfo};
pub use weather::{WeatherQuery, WeatherSnapshot, WeatherSource};
pub use weight_store::{
    to_tenth_kg,
    LastUpdates, MemoryWeightStore, SharedWeightStore, WeightEntry, WeightStore,
};

/// Failure reported by an external collaborator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    /// The service could not be reached or refused the request
    #[error("{service} unavailable: {reason}")]
    Unavailable { service: &'static str, reason: String },
    /// The service answered with something we could not use
    #[error("{service} returned invalid data: {reason}")]
    InvalidData { service: &'static str, reason: String },
}

impl CollaboratorError {
    pub fn unavailable(service: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            service,
            reason: reason.into(),
        }
    }

    pub fn invalid_data(service: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidData {
            service,
            reason: reason.into(),
        }
    }

    /// Name of the collaborator that failed
    pub fn service(&self) -> &'static str {
        match self {
            Self::Unavailable { service, .. } | Self::InvalidData { service, .. } => service,
        }
    }
}
