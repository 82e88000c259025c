use std::path::PathBuf;

use thiserror::Error;

use crate::types::TreatyId;

/// A record that breaks the input contract of the exposure core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{kind} id is empty")]
    EmptyId { kind: &'static str },
    #[error("latitude {value} outside [-90, 90]")]
    Latitude { value: f64 },
    #[error("longitude {value} outside [-180, 180]")]
    Longitude { value: f64 },
    #[error("magnitude {value} must be a non-negative number")]
    Magnitude { value: f64 },
    #[error("depth {value} km must be a non-negative number")]
    Depth { value: f64 },
    #[error("treaty {treaty}: radius {value} km must be positive")]
    Radius { treaty: TreatyId, value: f64 },
    #[error("duplicate treaty id {0}")]
    DuplicateTreaty(TreatyId),
}

/// Failure while loading events or treaties from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON at line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("record {index} is invalid: {source}")]
    Validation {
        index: usize,
        #[source]
        source: ValidationError,
    },
    /// NDJSON counterpart of `Validation`; `line` is 1-based like `Json::line`.
    #[error("line {line} is invalid: {source}")]
    InvalidLine {
        line: usize,
        #[source]
        source: ValidationError,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io { path: path.into(), source }
    }

    pub(crate) fn json(source: serde_json::Error) -> Self {
        LoadError::Json { line: source.line(), source }
    }
}
