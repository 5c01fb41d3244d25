//! Shared test fixtures

use std::cell::RefCell;
use std::rc::Rc;

use weightloss_core::{build_screens, Collaborators, Controller, MemoryWeightStore};

use crate::collaborators::{LocalClock, OfflineWeather, SystemHost};
use crate::config::parse_config;

/// Collaborators that touch neither the network nor the disk
pub fn offline_collaborators() -> Collaborators {
    Collaborators {
        clock: Rc::new(LocalClock),
        host: Rc::new(SystemHost),
        weather: Box::new(OfflineWeather::default()),
        weight_store: Rc::new(RefCell::new(MemoryWeightStore::new())),
    }
}

/// Controller for the screens configured in `text`
pub fn controller_from(text: &str) -> Controller {
    let config = parse_config(text).unwrap();
    let screens = build_screens(&config.screens, &mut offline_collaborators()).unwrap();
    Controller::new(screens, config.controller_settings()).unwrap()
}
