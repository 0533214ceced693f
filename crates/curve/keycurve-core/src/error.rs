//! Error types for curve mutation, enumeration and record parsing.

/// Failures reported by [`Curve`](crate::Curve) operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CurveError {
    /// Another key already occupies this time.
    #[error("a key already exists at time {time}")]
    DuplicateTime { time: f64 },

    /// Index does not address a stored key.
    #[error("key index {index} is out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The curve was mutated while a cursor was walking it.
    #[error("curve was modified during enumeration (version {expected} -> {found})")]
    ConcurrentModification { expected: u64, found: u64 },

    /// Key times must be finite so the key set stays totally ordered.
    #[error("key time {time} is not finite")]
    InvalidTime { time: f64 },
}

impl CurveError {
    /// Duplicate rejections are expected during editing; everything else is a
    /// caller bug.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DuplicateTime { .. })
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::DuplicateTime { .. } => "rejected",
            Self::IndexOutOfRange { .. } => "index",
            Self::ConcurrentModification { .. } => "enumeration",
            Self::InvalidTime { .. } => "validation",
        }
    }
}

/// Why a single text record could not be turned into a key.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("record is empty")]
    Empty,

    #[error("expected 2, 3 or 4 fields, found {found}")]
    FieldCount { found: usize },

    #[error("field {index} is not a number: '{text}'")]
    InvalidNumber { index: usize, text: String },

    #[error("unknown tangent mode '{name}'")]
    UnknownTangentMode { name: String },
}

/// Configuration could not be read.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config json parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_is_recoverable() {
        let err = CurveError::DuplicateTime { time: 1.0 };
        assert!(err.is_recoverable());
        assert_eq!(err.category(), "rejected");
    }

    #[test]
    fn index_errors_are_not_recoverable() {
        let err = CurveError::IndexOutOfRange { index: 3, len: 2 };
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "key index 3 is out of range (len 2)");
    }

    #[test]
    fn record_error_messages() {
        let err = RecordError::InvalidNumber {
            index: 1,
            text: "abc".into(),
        };
        assert_eq!(err.to_string(), "field 1 is not a number: 'abc'");
    }
}
