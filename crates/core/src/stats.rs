// Copyright 2025 perfseries Contributors
// SPDX-License-Identifier: Apache-2.0

//! Summary statistics over a series.

use crate::series::SeriesPoint;
use serde::{Deserialize, Serialize};

/// Aggregate view of one series, used by reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    /// Number of points.
    pub count: usize,
    /// Smallest index.
    pub first_index: u64,
    /// Largest index.
    pub last_index: u64,
    /// Smallest duration.
    pub min: f64,
    /// Largest duration.
    pub max: f64,
    /// Arithmetic mean duration.
    pub mean: f64,
    /// Median duration (nearest rank).
    pub median: f64,
    /// 95th percentile duration (nearest rank).
    pub p95: f64,
}

impl SeriesSummary {
    /// Compute the summary of `points`, `None` when there are none.
    pub fn compute(points: &[SeriesPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut durations: Vec<f64> = points.iter().map(|p| p.duration).collect();
        durations.sort_by(f64::total_cmp);

        let count = durations.len();
        let sum: f64 = durations.iter().sum();
        let first_index = points.iter().map(|p| p.index).min()?;
        let last_index = points.iter().map(|p| p.index).max()?;

        Some(Self {
            count,
            first_index,
            last_index,
            min: durations[0],
            max: durations[count - 1],
            mean: sum / count as f64,
            median: nearest_rank(&durations, 50.0),
            p95: nearest_rank(&durations, 95.0),
        })
    }
}

/// Nearest-rank percentile of an ascending, non-empty slice.
fn nearest_rank(sorted: &[f64], percentile: f64) -> f64 {
    let rank = ((percentile / 100.0) * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_points_have_no_summary() {
        assert!(SeriesSummary::compute(&[]).is_none());
    }

    #[test]
    fn test_single_point() {
        let summary = SeriesSummary::compute(&[SeriesPoint::new(7, 4.5)]).unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.first_index, 7);
        assert_eq!(summary.last_index, 7);
        assert_eq!(summary.min, 4.5);
        assert_eq!(summary.max, 4.5);
        assert_eq!(summary.median, 4.5);
        assert_eq!(summary.p95, 4.5);
    }

    #[test]
    fn test_summary_of_hundred_points() {
        let points: Vec<SeriesPoint> = (1..=100)
            .rev()
            .map(|i| SeriesPoint::new(i * 100 + 1, i as f64))
            .collect();
        let summary = SeriesSummary::compute(&points).unwrap();
        assert_eq!(summary.count, 100);
        assert_eq!(summary.first_index, 101);
        assert_eq!(summary.last_index, 10_001);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 100.0);
        assert_eq!(summary.mean, 50.5);
        assert_eq!(summary.median, 50.0);
        assert_eq!(summary.p95, 95.0);
    }
}
