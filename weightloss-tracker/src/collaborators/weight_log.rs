//! File-backed weight log
//!
//! One TOML table per person, one `YYYY-MM-DD = weight` entry per day:
//!
//! ```toml
//! [Lukas]
//! 2024-03-01 = 81.4
//! 2024-03-02 = 81.1
//! ```
//!
//! Every write rewrites the whole file through a temporary file and a
//! rename. The in-memory copy only changes once the file is on disk.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{debug, info};

use weightloss_core::{
    to_tenth_kg, CollaboratorError, MemoryWeightStore, WeightEntry, WeightStore,
};

const SERVICE: &str = "weight log";

type FileLayout = BTreeMap<String, BTreeMap<String, f64>>;

/// Weight store persisted to a TOML file
#[derive(Debug)]
pub struct WeightLog {
    path: PathBuf,
    memory: MemoryWeightStore,
}

fn io_error(path: &Path, e: std::io::Error) -> CollaboratorError {
    CollaboratorError::unavailable(SERVICE, format!("{}: {}", path.display(), e))
}

/// Weights are entered in tenths; keep the file free of f32 noise
fn to_file_value(weight_kg: f32) -> f64 {
    (f64::from(weight_kg) * 10.0).round() / 10.0
}

impl WeightLog {
    /// Open `path`; a missing file is an empty log
    pub fn open(path: &Path) -> Result<Self, CollaboratorError> {
        let memory = match fs::read_to_string(path) {
            Ok(text) => Self::decode(&text)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("{} does not exist yet, starting an empty log", path.display());
                MemoryWeightStore::new()
            }
            Err(e) => return Err(io_error(path, e)),
        };
        Ok(Self {
            path: path.to_path_buf(),
            memory,
        })
    }

    fn decode(text: &str) -> Result<MemoryWeightStore, CollaboratorError> {
        let layout: FileLayout = toml::from_str(text)
            .map_err(|e| CollaboratorError::invalid_data(SERVICE, e.to_string()))?;
        let mut memory = MemoryWeightStore::new();
        for (person, days) in layout {
            for (day, weight) in days {
                let date: NaiveDate = day.parse().map_err(|_| {
                    let reason = format!("bad date `{day}` for {person}");
                    CollaboratorError::invalid_data(SERVICE, reason)
                })?;
                memory.insert(&person, date, to_tenth_kg(weight as f32));
            }
        }
        Ok(memory)
    }

    fn encode(memory: &MemoryWeightStore) -> Result<String, CollaboratorError> {
        let layout: FileLayout = memory
            .people()
            .iter()
            .map(|(person, days)| {
                let days = days
                    .iter()
                    .map(|(date, &weight)| {
                        (date.format("%Y-%m-%d").to_string(), to_file_value(weight))
                    })
                    .collect();
                (person.clone(), days)
            })
            .collect();
        toml::to_string(&layout)
            .map_err(|e| CollaboratorError::invalid_data(SERVICE, e.to_string()))
    }

    fn persist(&self, memory: &MemoryWeightStore) -> Result<(), CollaboratorError> {
        let text = Self::encode(memory)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, text).map_err(|e| io_error(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| io_error(&self.path, e))?;
        debug!("wrote {}", self.path.display());
        Ok(())
    }
}

impl WeightStore for WeightLog {
    fn write_weight(
        &mut self,
        person: &str,
        weight_kg: f32,
        date: NaiveDate,
    ) -> Result<(), CollaboratorError> {
        let mut updated = self.memory.clone();
        updated.write_weight(person, weight_kg, date)?;
        self.persist(&updated)?;
        self.memory = updated;
        Ok(())
    }

    fn read_weight(
        &mut self,
        person: &str,
        date: NaiveDate,
    ) -> Result<Option<f32>, CollaboratorError> {
        self.memory.read_weight(person, date)
    }

    fn read_history(&mut self, person: &str) -> Result<Vec<WeightEntry>, CollaboratorError> {
        self.memory.read_history(person)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut log = WeightLog::open(&dir.path().join("weights.toml")).unwrap();
        assert!(log.read_history("Lukas").unwrap().is_empty());
        assert_eq!(log.read_last_updates("Lukas").unwrap(), None);
    }

    #[test]
    fn test_write_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weights.toml");

        let mut log = WeightLog::open(&path).unwrap();
        log.write_weight("Lukas", 81.4, day(1)).unwrap();
        log.write_weight("Lukas", 81.1, day(2)).unwrap();
        log.write_weight("Anna", 60.2, day(2)).unwrap();

        let mut reopened = WeightLog::open(&path).unwrap();
        assert_eq!(reopened.read_weight("Lukas", day(1)).unwrap(), Some(81.4));
        assert_eq!(reopened.read_weight("Anna", day(2)).unwrap(), Some(60.2));
        assert_eq!(reopened.read_history("Lukas").unwrap().len(), 2);
    }

    #[test]
    fn test_file_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weights.toml");
        let mut log = WeightLog::open(&path).unwrap();
        log.write_weight("Lukas", 79.9, day(5)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("[Lukas]"));
        assert!(text.contains("2024-03-05 = 79.9"));
    }

    #[test]
    fn test_failed_persist_keeps_memory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("weights.toml");
        let mut log = WeightLog::open(&path).unwrap();

        assert!(log.write_weight("Lukas", 80.0, day(1)).is_err());
        assert_eq!(log.read_weight("Lukas", day(1)).unwrap(), None);
    }

    #[test]
    fn test_reopen_reads_what_was_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weights.toml");
        let mut log = WeightLog::open(&path).unwrap();
        log.write_weight("Lukas", 80.04, day(1)).unwrap();
        let before = log.read_weight("Lukas", day(1)).unwrap();

        let mut reopened = WeightLog::open(&path).unwrap();
        assert_eq!(before, Some(80.0));
        assert_eq!(reopened.read_weight("Lukas", day(1)).unwrap(), before);
    }

    #[test]
    fn test_corrupt_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weights.toml");
        fs::write(&path, "[Lukas]\nyesterday = 80.0\n").unwrap();
        assert!(matches!(
            WeightLog::open(&path),
            Err(CollaboratorError::InvalidData { .. })
        ));
    }

    proptest! {
        #[test]
        fn round_trip_through_file(tenths in 0i32..3000, d in 1u32..=28) {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("weights.toml");
            let weight = tenths as f32 / 10.0;

            let mut log = WeightLog::open(&path).unwrap();
            log.write_weight("p", weight, day(d)).unwrap();
            let mut reopened = WeightLog::open(&path).unwrap();
            prop_assert_eq!(reopened.read_weight("p", day(d)).unwrap(), Some(weight));
        }
    }
}
