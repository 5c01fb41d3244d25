//! Fakes shared by the unit tests

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::registry::Collaborators;
use crate::traits::{
    Clock, CollaboratorError, HostInfo, MemoryWeightStore, SharedWeightStore, WeatherQuery,
    WeatherSnapshot, WeatherSource, WeightEntry, WeightStore,
};

pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Rc<Self> {
        let now = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, min, sec))
            .unwrap();
        Rc::new(Self { now: Cell::new(now) })
    }

    pub fn advance_seconds(&self, seconds: i64) {
        self.now.set(self.now.get() + TimeDelta::seconds(seconds));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

pub struct FakeHost {
    pub ip: String,
    pub name: String,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            ip: "192.168.1.23".to_string(),
            name: "tracker".to_string(),
        }
    }
}

impl HostInfo for FakeHost {
    fn ip_address(&self) -> String {
        self.ip.clone()
    }

    fn hostname(&self) -> String {
        self.name.clone()
    }
}

pub struct FakeWeather {
    pub calls: usize,
    pub fail: bool,
    pub temperature_c: f32,
    pub queries: Vec<WeatherQuery>,
}

impl Default for FakeWeather {
    fn default() -> Self {
        Self {
            calls: 0,
            fail: false,
            temperature_c: 21.5,
            queries: Vec::new(),
        }
    }
}

impl WeatherSource for FakeWeather {
    fn fetch_current(
        &mut self,
        query: &WeatherQuery,
    ) -> Result<WeatherSnapshot, CollaboratorError> {
        self.calls += 1;
        self.queries.push(query.clone());
        if self.fail {
            return Err(CollaboratorError::unavailable("weather", "offline"));
        }
        Ok(WeatherSnapshot {
            temperature_c: self.temperature_c,
            city: "Munich".to_string(),
            sunrise: None,
            sunset: None,
        })
    }
}

/// Memory store whose writes can be made to fail
#[derive(Default)]
pub struct FailingStore {
    pub inner: MemoryWeightStore,
    pub fail_writes: bool,
}

impl WeightStore for FailingStore {
    fn write_weight(
        &mut self,
        person: &str,
        weight_kg: f32,
        date: NaiveDate,
    ) -> Result<(), CollaboratorError> {
        if self.fail_writes {
            return Err(CollaboratorError::unavailable("weight store", "disk full"));
        }
        self.inner.write_weight(person, weight_kg, date)
    }

    fn read_weight(
        &mut self,
        person: &str,
        date: NaiveDate,
    ) -> Result<Option<f32>, CollaboratorError> {
        self.inner.read_weight(person, date)
    }

    fn read_history(&mut self, person: &str) -> Result<Vec<WeightEntry>, CollaboratorError> {
        self.inner.read_history(person)
    }
}

pub fn shared<S: WeightStore + 'static>(store: S) -> SharedWeightStore {
    Rc::new(RefCell::new(store))
}

/// Collaborators backed by the fakes above
pub fn collaborators() -> Collaborators {
    Collaborators {
        clock: FixedClock::at(2024, 3, 15, 8, 0, 0),
        host: Rc::new(FakeHost::default()),
        weather: Box::new(FakeWeather::default()),
        weight_store: shared(MemoryWeightStore::new()),
    }
}
