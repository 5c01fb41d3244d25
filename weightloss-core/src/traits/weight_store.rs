//! Per-person weight log

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use chrono::NaiveDate;

use super::CollaboratorError;
use crate::trend;

/// One recorded weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightEntry {
    pub date: NaiveDate,
    pub weight_kg: f32,
}

/// Summary of the most recent entry of a person
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LastUpdates {
    pub last_date: NaiveDate,
    pub weight_kg: f32,
    /// Smoothed weight at `last_date`
    pub trend_kg: f32,
    /// `weight_kg - trend_kg`
    pub variance_kg: f32,
}

/// Weights are kept to a tenth of a kilogram
///
/// `weight_kg` must be finite and non-negative.
pub fn to_tenth_kg(weight_kg: f32) -> f32 {
    ((weight_kg * 10.0 + 0.5) as i64) as f32 / 10.0
}

/// Storage for daily weights, one value per person and date
///
/// Writing a date that already has a value replaces it. Written weights
/// are rounded to a tenth of a kilogram.
pub trait WeightStore {
    /// Last entry of `person` with its trend, `None` if nothing is recorded
    fn read_last_updates(
        &mut self,
        person: &str,
    ) -> Result<Option<LastUpdates>, CollaboratorError> {
        let history = self.read_history(person)?;
        Ok(trend::last_updates(&history))
    }

    fn write_weight(
        &mut self,
        person: &str,
        weight_kg: f32,
        date: NaiveDate,
    ) -> Result<(), CollaboratorError>;

    fn read_weight(
        &mut self,
        person: &str,
        date: NaiveDate,
    ) -> Result<Option<f32>, CollaboratorError>;

    /// All entries of `person`, oldest first
    fn read_history(&mut self, person: &str) -> Result<Vec<WeightEntry>, CollaboratorError>;
}

/// Weight store handle shared by the screens of one controller
pub type SharedWeightStore = Rc<RefCell<dyn WeightStore>>;

/// Volatile weight store
///
/// Also the in-memory half of file-backed stores, which persist
/// [`MemoryWeightStore::people`] after each write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryWeightStore {
    people: BTreeMap<String, BTreeMap<NaiveDate, f32>>,
}

impl MemoryWeightStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a weight without going through the trait
    pub fn insert(&mut self, person: &str, date: NaiveDate, weight_kg: f32) {
        self.people
            .entry(person.to_string())
            .or_default()
            .insert(date, weight_kg);
    }

    /// Every person with their entries, ordered by name then date
    pub fn people(&self) -> &BTreeMap<String, BTreeMap<NaiveDate, f32>> {
        &self.people
    }

    pub fn is_empty(&self) -> bool {
        self.people.values().all(BTreeMap::is_empty)
    }
}

impl WeightStore for MemoryWeightStore {
    fn write_weight(
        &mut self,
        person: &str,
        weight_kg: f32,
        date: NaiveDate,
    ) -> Result<(), CollaboratorError> {
        if !weight_kg.is_finite() || weight_kg < 0.0 {
            return Err(CollaboratorError::invalid_data(
                "weight store",
                "weight must be a finite, non-negative number",
            ));
        }
        self.insert(person, date, to_tenth_kg(weight_kg));
        Ok(())
    }

    fn read_weight(
        &mut self,
        person: &str,
        date: NaiveDate,
    ) -> Result<Option<f32>, CollaboratorError> {
        Ok(self
            .people
            .get(person)
            .and_then(|entries| entries.get(&date))
            .copied())
    }

    fn read_history(&mut self, person: &str) -> Result<Vec<WeightEntry>, CollaboratorError> {
        Ok(self
            .people
            .get(person)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(&date, &weight_kg)| WeightEntry { date, weight_kg })
                    .collect()
            })
            .unwrap_or_default())
    }
}
