// Copyright 2025 perfseries Contributors
// SPDX-License-Identifier: Apache-2.0

//! Concurrent sample recorder.
//!
//! A [`Recorder`] owns one append-only log per series key. Writers to
//! different keys only meet on the map shard while the log is looked up,
//! the append itself happens under that key's own mutex.
//!
//! # Invariants
//!
//! - A rejected sample never reaches a log.
//! - Logs are append-only; nothing is overwritten or removed.
//! - [`Recorder::snapshot`] is linearizable with respect to
//!   [`Recorder::record`]: every `record` call either happened entirely
//!   before the snapshot or entirely after it.

use crate::error::InvalidSampleError;
use crate::sample::{Sample, SeriesKey};
use crate::series::{ResultSeries, SeriesPoint};
use dashmap::DashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, warn};

type SeriesLog = Arc<Mutex<Vec<SeriesPoint>>>;

/// Accumulates samples for one benchmark run.
///
/// Create one per run and share it by reference (or `Arc`) with the
/// harness workers.
#[derive(Debug, Default)]
pub struct Recorder {
    logs: DashMap<SeriesKey, SeriesLog>,
    // Held shared by `record`, exclusively by `snapshot`.
    gate: RwLock<()>,
}

impl Recorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sample.
    ///
    /// The sample is appended to the series for its key, which is created
    /// on first use. Repeated indices are kept and land after the entries
    /// already recorded with that index.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSampleError`] if the sample has an empty key
    /// component or a negative or non-finite duration. Nothing is recorded
    /// in that case.
    pub fn record(&self, sample: Sample) -> Result<(), InvalidSampleError> {
        self.record_ref(&sample)
    }

    /// Record a batch of samples, continuing past rejected ones.
    pub fn record_all(&self, samples: impl IntoIterator<Item = Sample>) -> RecordOutcome {
        let mut outcome = RecordOutcome::default();
        for (position, sample) in samples.into_iter().enumerate() {
            match self.record_ref(&sample) {
                Ok(()) => outcome.accepted += 1,
                Err(error) => outcome.rejected.push(Rejection {
                    position,
                    sample,
                    error,
                }),
            }
        }
        outcome
    }

    fn record_ref(&self, sample: &Sample) -> Result<(), InvalidSampleError> {
        if let Err(err) = sample.validate() {
            warn!(
                operation = %sample.operation,
                dbtype = %sample.dbtype,
                master = %sample.master,
                index = sample.index,
                error = %err,
                "rejected sample"
            );
            return Err(err);
        }

        let point = SeriesPoint::new(sample.index, sample.duration);
        let _gate = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        let log = self.log_for(sample.key());
        log.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(point);
        Ok(())
    }

    /// Take a point-in-time view of every series.
    ///
    /// Series are ordered by key, points by index with ties in recording
    /// order.
    pub fn snapshot(&self) -> Snapshot {
        let _gate = self.gate.write().unwrap_or_else(PoisonError::into_inner);
        let mut series: Vec<ResultSeries> = self
            .logs
            .iter()
            .map(|entry| {
                let points = entry
                    .value()
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone();
                ResultSeries::from_recorded(entry.key().clone(), points)
            })
            .collect();
        series.sort_by(|a, b| a.key().cmp(b.key()));
        Snapshot { series }
    }

    /// View of a single series.
    ///
    /// A key that was never recorded yields an empty series.
    pub fn series(&self, key: &SeriesKey) -> ResultSeries {
        let _gate = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        let log = self.logs.get(key).map(|entry| Arc::clone(entry.value()));
        match log {
            Some(log) => {
                let points = log.lock().unwrap_or_else(PoisonError::into_inner).clone();
                ResultSeries::from_recorded(key.clone(), points)
            }
            None => ResultSeries::empty(key.clone()),
        }
    }

    /// Number of distinct keys recorded so far.
    pub fn len(&self) -> usize {
        self.logs.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    /// Total number of accepted samples across all keys.
    pub fn sample_count(&self) -> usize {
        let _gate = self.gate.write().unwrap_or_else(PoisonError::into_inner);
        self.logs
            .iter()
            .map(|entry| {
                entry
                    .value()
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .len()
            })
            .sum()
    }

    fn log_for(&self, key: SeriesKey) -> SeriesLog {
        if let Some(entry) = self.logs.get(&key) {
            return Arc::clone(entry.value());
        }
        let entry = self.logs.entry(key.clone()).or_insert_with(|| {
            debug!(series = %key, "created series");
            SeriesLog::default()
        });
        Arc::clone(entry.value())
    }
}

/// Result of [`Recorder::record_all`].
#[derive(Debug, Default)]
pub struct RecordOutcome {
    /// Number of samples recorded.
    pub accepted: usize,
    /// Samples that were rejected, in input order.
    pub rejected: Vec<Rejection>,
}

impl RecordOutcome {
    /// Whether every sample was recorded.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// A sample rejected by [`Recorder::record_all`].
#[derive(Debug)]
pub struct Rejection {
    /// Zero-based position in the input.
    pub position: usize,
    /// The rejected sample.
    pub sample: Sample,
    /// Why it was rejected.
    pub error: InvalidSampleError,
}

/// Immutable view of all series at one point in time.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    series: Vec<ResultSeries>,
}

impl Snapshot {
    /// Series ordered by key.
    pub fn series(&self) -> &[ResultSeries] {
        &self.series
    }

    /// Look up one series.
    pub fn get(&self, key: &SeriesKey) -> Option<&ResultSeries> {
        self.series
            .binary_search_by(|s| s.key().cmp(key))
            .ok()
            .map(|i| &self.series[i])
    }

    /// Iterate over the series.
    pub fn iter(&self) -> std::slice::Iter<'_, ResultSeries> {
        self.series.iter()
    }

    /// Number of series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether the snapshot holds no series.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total number of points across all series.
    pub fn total_samples(&self) -> usize {
        self.series.iter().map(ResultSeries::len).sum()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a ResultSeries;
    type IntoIter = std::slice::Iter<'a, ResultSeries>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.iter()
    }
}

impl IntoIterator for Snapshot {
    type Item = ResultSeries;
    type IntoIter = std::vec::IntoIter<ResultSeries>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SampleField;

    const MASTER: &str = "com.opengamma.masterdb.DbConfigMasterBulkTest";

    fn sample(index: u64, duration: f64) -> Sample {
        Sample::new("search", "postgres", MASTER, index, duration)
    }

    #[test]
    fn test_tied_indices_keep_insertion_order() {
        let recorder = Recorder::new();
        recorder.record(sample(1, 63.11)).unwrap();
        recorder.record(sample(101, 372.16)).unwrap();
        recorder.record(sample(1, 100.0)).unwrap();

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.len(), 1);
        let points = snapshot.series()[0].points();
        assert_eq!(
            points,
            &[
                SeriesPoint::new(1, 63.11),
                SeriesPoint::new(1, 100.0),
                SeriesPoint::new(101, 372.16),
            ]
        );
    }

    #[test]
    fn test_snapshot_points_sorted_by_index() {
        let recorder = Recorder::new();
        for index in [901, 1, 501, 301, 1001, 101, 701] {
            recorder.record(sample(index, index as f64 / 10.0)).unwrap();
        }

        let snapshot = recorder.snapshot();
        let points = snapshot.series()[0].points();
        assert!(points.windows(2).all(|w| w[0].index <= w[1].index));
    }

    #[test]
    fn test_keys_do_not_cross_contaminate() {
        let recorder = Recorder::new();
        let keys = [
            ("search", "postgres", "a.ConfigTest"),
            ("search", "postgres", "a.ExchangeTest"),
            ("add", "postgres", "a.ConfigTest"),
            ("search", "hsqldb", "a.ConfigTest"),
        ];
        for (n, (operation, dbtype, master)) in keys.iter().enumerate() {
            for index in 0..=n as u64 {
                recorder
                    .record(Sample::new(*operation, *dbtype, *master, index, n as f64))
                    .unwrap();
            }
        }

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.len(), keys.len());
        assert_eq!(recorder.len(), keys.len());
        for (n, (operation, dbtype, master)) in keys.iter().enumerate() {
            let series = snapshot
                .get(&SeriesKey::new(*operation, *dbtype, *master))
                .unwrap();
            assert_eq!(series.len(), n + 1);
            assert!(series.points().iter().all(|p| p.duration == n as f64));
        }
        assert_eq!(snapshot.total_samples(), 1 + 2 + 3 + 4);
        assert_eq!(recorder.sample_count(), 10);
    }

    #[test]
    fn test_invalid_samples_never_appear() {
        let recorder = Recorder::new();
        recorder.record(sample(1, 5.0)).unwrap();

        assert!(recorder.record(sample(2, -1.0)).is_err());
        let err = recorder
            .record(Sample::new("", "postgres", MASTER, 3, 1.0))
            .unwrap_err();
        assert_eq!(err.field(), SampleField::Operation);
        assert!(recorder
            .record(Sample::new("search", "", MASTER, 4, 1.0))
            .is_err());
        assert!(recorder
            .record(Sample::new("search", "postgres", "", 5, 1.0))
            .is_err());

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.series()[0].points(), &[SeriesPoint::new(1, 5.0)]);
    }

    #[test]
    fn test_record_all_reports_rejections() {
        let recorder = Recorder::new();
        let outcome = recorder.record_all(vec![
            sample(1, 1.0),
            sample(2, -3.0),
            sample(3, 2.0),
            sample(4, f64::NAN),
        ]);

        assert_eq!(outcome.accepted, 2);
        assert!(!outcome.is_clean());
        let positions: Vec<usize> = outcome.rejected.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 3]);
        assert_eq!(recorder.sample_count(), 2);
    }

    #[test]
    fn test_unknown_key_yields_empty_series() {
        let recorder = Recorder::new();
        recorder.record(sample(1, 1.0)).unwrap();

        let missing = SeriesKey::new("delete", "postgres", MASTER);
        let series = recorder.series(&missing);
        assert!(series.is_empty());
        assert_eq!(series.key(), &missing);
        assert_eq!(recorder.len(), 1);

        let present = recorder.series(&sample(1, 1.0).key());
        assert_eq!(present.len(), 1);
    }

    #[test]
    fn test_snapshot_is_detached_from_later_records() {
        let recorder = Recorder::new();
        recorder.record(sample(1, 1.0)).unwrap();
        let before = recorder.snapshot();
        recorder.record(sample(2, 2.0)).unwrap();

        assert_eq!(before.total_samples(), 1);
        assert_eq!(recorder.snapshot().total_samples(), 2);
    }

    #[test]
    fn test_concurrent_writers_on_multiple_keys() {
        const WRITERS_PER_KEY: usize = 4;
        const SAMPLES_PER_WRITER: u64 = 500;
        let keys = ["a.ConfigTest", "a.ExchangeTest", "a.PositionTest"];
        let recorder = Recorder::new();

        std::thread::scope(|scope| {
            for master in keys {
                for writer in 0..WRITERS_PER_KEY {
                    let recorder = &recorder;
                    scope.spawn(move || {
                        for i in 0..SAMPLES_PER_WRITER {
                            let index = i * WRITERS_PER_KEY as u64 + writer as u64;
                            recorder
                                .record(Sample::new("search", "postgres", master, index, 1.0))
                                .unwrap();
                        }
                    });
                }
            }
            // Snapshots taken mid-run must stay internally consistent.
            let recorder = &recorder;
            scope.spawn(move || {
                for _ in 0..50 {
                    let snapshot = recorder.snapshot();
                    for series in &snapshot {
                        assert!(series.points().windows(2).all(|w| w[0].index <= w[1].index));
                    }
                }
            });
        });

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.len(), keys.len());
        for series in &snapshot {
            assert_eq!(series.len(), WRITERS_PER_KEY * SAMPLES_PER_WRITER as usize);
        }
    }
}
