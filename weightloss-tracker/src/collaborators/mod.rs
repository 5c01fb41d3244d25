//! Concrete collaborators backing the screens on the host

pub mod clock;
pub mod host;
pub mod weather;
pub mod weight_log;

use std::cell::RefCell;
use std::rc::Rc;

use weightloss_core::{Collaborators, CollaboratorError};

use crate::config::{GadgetSettings, WeatherSourceKind};

pub use clock::LocalClock;
pub use host::SystemHost;
pub use weather::{OfflineWeather, OpenWeatherMap};
pub use weight_log::WeightLog;

/// Wire up the collaborators selected by the global settings
pub fn build(settings: &GadgetSettings) -> Result<Collaborators, CollaboratorError> {
    let weight_log = WeightLog::open(&settings.weight_log)?;
    let weather: Box<dyn weightloss_core::WeatherSource> = match settings.weather_source {
        WeatherSourceKind::OpenWeatherMap => Box::new(OpenWeatherMap::default()),
        WeatherSourceKind::Offline => Box::new(OfflineWeather::default()),
    };
    Ok(Collaborators {
        clock: Rc::new(LocalClock),
        host: Rc::new(SystemHost),
        weather,
        weight_store: Rc::new(RefCell::new(weight_log)),
    })
}
