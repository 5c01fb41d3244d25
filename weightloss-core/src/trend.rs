//! Weight trend math
//!
//! The trend is an exponentially smoothed moving average of the daily
//! weights. The variance of a day is how far its weight sits above the
//! trend.

use alloc::vec::Vec;

use crate::traits::{LastUpdates, WeightEntry};

/// Smoothing factor applied to each new weight
pub const SMOOTHING: f32 = 0.1;

/// One day of the smoothed series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub entry: WeightEntry,
    pub trend_kg: f32,
}

impl TrendPoint {
    pub fn variance_kg(&self) -> f32 {
        self.entry.weight_kg - self.trend_kg
    }
}

/// Next trend value after observing `weight_kg`
#[inline]
pub fn step(previous_trend: f32, weight_kg: f32) -> f32 {
    previous_trend + SMOOTHING * (weight_kg - previous_trend)
}

/// Smooth a series of entries, oldest first
///
/// The first trend equals the first weight.
pub fn smooth(entries: &[WeightEntry]) -> Vec<TrendPoint> {
    let mut trend = None;
    entries
        .iter()
        .map(|entry| {
            let next = match trend {
                None => entry.weight_kg,
                Some(previous) => step(previous, entry.weight_kg),
            };
            trend = Some(next);
            TrendPoint {
                entry: *entry,
                trend_kg: next,
            }
        })
        .collect()
}

/// Summary of the newest entry, `None` for an empty series
pub fn last_updates(entries: &[WeightEntry]) -> Option<LastUpdates> {
    let last = *smooth(entries).last()?;
    Some(LastUpdates {
        last_date: last.entry.date,
        weight_kg: last.entry.weight_kg,
        trend_kg: last.trend_kg,
        variance_kg: last.variance_kg(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn entries(weights: &[f32]) -> Vec<WeightEntry> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        weights
            .iter()
            .enumerate()
            .map(|(i, &weight_kg)| WeightEntry {
                date: start + chrono::Days::new(i as u64),
                weight_kg,
            })
            .collect()
    }

    #[test]
    fn test_first_trend_is_first_weight() {
        let points = smooth(&entries(&[85.0]));
        assert_eq!(points[0].trend_kg, 85.0);
        assert_eq!(points[0].variance_kg(), 0.0);
    }

    #[test]
    fn test_smoothing_factor() {
        let points = smooth(&entries(&[80.0, 90.0, 90.0]));
        assert!((points[1].trend_kg - 81.0).abs() < 1e-4);
        assert!((points[2].trend_kg - 81.9).abs() < 1e-4);
    }

    #[test]
    fn test_empty_series() {
        assert!(smooth(&[]).is_empty());
        assert_eq!(last_updates(&[]), None);
    }

    proptest! {
        #[test]
        fn trend_stays_within_observed_range(
            weights in proptest::collection::vec(40.0f32..150.0, 1..60),
        ) {
            let min = weights.iter().cloned().fold(f32::MAX, f32::min);
            let max = weights.iter().cloned().fold(f32::MIN, f32::max);
            for point in smooth(&entries(&weights)) {
                prop_assert!(point.trend_kg >= min - 1e-3);
                prop_assert!(point.trend_kg <= max + 1e-3);
            }
        }
    }
}
