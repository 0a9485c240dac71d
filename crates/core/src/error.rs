// Copyright 2025 perfseries Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for sample recording and series serialization.

use crate::sample::SeriesKey;
use std::fmt;
use thiserror::Error;

/// The sample field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleField {
    /// Operation name.
    Operation,
    /// Database kind.
    DbType,
    /// Subject identifier.
    Master,
    /// Measured duration.
    Duration,
}

impl fmt::Display for SampleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Operation => "operation",
            Self::DbType => "dbtype",
            Self::Master => "master",
            Self::Duration => "duration",
        };
        f.write_str(name)
    }
}

/// A sample was rejected before reaching any series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidSampleError {
    /// A key component was empty.
    #[error("invalid sample: {field} must not be empty")]
    EmptyField {
        /// The empty field.
        field: SampleField,
    },

    /// The duration was negative.
    #[error("invalid sample: duration must be >= 0, got {duration}")]
    NegativeDuration {
        /// The offending duration.
        duration: f64,
    },

    /// The duration was NaN or infinite.
    #[error("invalid sample: duration must be finite, got {duration}")]
    NonFiniteDuration {
        /// The offending duration.
        duration: f64,
    },
}

impl InvalidSampleError {
    /// The field that failed validation.
    pub fn field(&self) -> SampleField {
        match self {
            Self::EmptyField { field } => *field,
            Self::NegativeDuration { .. } | Self::NonFiniteDuration { .. } => SampleField::Duration,
        }
    }
}

/// A series could not be rendered for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot serialize series {key}: no samples recorded")]
pub struct SerializationError {
    /// Key of the empty series.
    pub key: SeriesKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_sample_messages_name_the_field() {
        let err = InvalidSampleError::EmptyField {
            field: SampleField::Master,
        };
        assert!(err.to_string().contains("master"));
        assert_eq!(err.field(), SampleField::Master);

        let err = InvalidSampleError::NegativeDuration { duration: -1.5 };
        assert!(err.to_string().contains("-1.5"));
        assert_eq!(err.field(), SampleField::Duration);
    }

    #[test]
    fn test_serialization_error_mentions_key() {
        let err = SerializationError {
            key: SeriesKey::new("search", "postgres", "com.example.Test"),
        };
        let message = err.to_string();
        assert!(message.contains("postgres/com.example.Test/search"));
        assert!(message.contains("no samples"));
    }
}
