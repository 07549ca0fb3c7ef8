use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate rating state for one recipe, recomputed from the raw rating
/// rows on every read. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingStatistics {
    /// Arithmetic mean rounded to one decimal place; 0.0 when unrated.
    pub average: f64,
    pub total: u64,
    /// Star value 1..=5 to occurrence count. All five keys are always
    /// present, zero-filled.
    pub distribution: BTreeMap<i32, u64>,
}

impl RatingStatistics {
    pub fn from_values(values: &[i32]) -> Self {
        let mut distribution: BTreeMap<i32, u64> = (1..=5).map(|star| (star, 0)).collect();
        for value in values {
            if let Some(count) = distribution.get_mut(value) {
                *count += 1;
            }
        }

        let total = values.len() as u64;
        let average = if values.is_empty() {
            0.0
        } else {
            let sum: i64 = values.iter().map(|&v| i64::from(v)).sum();
            round_to_tenth(sum as f64 / values.len() as f64)
        };

        Self {
            average,
            total,
            distribution,
        }
    }

    pub fn empty() -> Self {
        Self::from_values(&[])
    }
}

pub(crate) fn round_to_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_reports_zeroes() {
        let stats = RatingStatistics::empty();
        assert_eq!(stats.average, 0.0);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.distribution.len(), 5);
        assert!(stats.distribution.values().all(|&c| c == 0));
    }

    #[test]
    fn distribution_keeps_all_keys() {
        let stats = RatingStatistics::from_values(&[5, 5, 3]);
        assert_eq!(stats.distribution[&1], 0);
        assert_eq!(stats.distribution[&2], 0);
        assert_eq!(stats.distribution[&3], 1);
        assert_eq!(stats.distribution[&4], 0);
        assert_eq!(stats.distribution[&5], 2);
        assert_eq!(stats.total, 3);
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        assert_eq!(RatingStatistics::from_values(&[4, 5]).average, 4.5);
        assert_eq!(RatingStatistics::from_values(&[5, 2]).average, 3.5);
        // 10 / 3 = 3.333...
        assert_eq!(RatingStatistics::from_values(&[3, 3, 4]).average, 3.3);
        // 11 / 3 = 3.666...
        assert_eq!(RatingStatistics::from_values(&[3, 4, 4]).average, 3.7);
    }

    #[test]
    fn out_of_range_values_do_not_widen_distribution() {
        let stats = RatingStatistics::from_values(&[5, 9]);
        assert_eq!(stats.distribution.len(), 5);
        assert_eq!(stats.distribution[&5], 1);
    }
}
