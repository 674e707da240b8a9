//! # Error Types
//!
//! Structured error types for load_core. The engine itself never fails on
//! well-formed input; these errors come from input validation, the strict
//! unknown-cargo policy and plan file I/O.
//!
//! ## Example
//!
//! ```rust
//! use load_core::errors::{CalcError, CalcResult};
//!
//! fn validate_weight(weight: f64) -> CalcResult<()> {
//!     if weight <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "weight",
//!             weight.to_string(),
//!             "Weight must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cargo::CargoId;

/// Result type alias for load_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for load planning operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive dimension, empty cargo list, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A placement references a cargo id that is not in the cargo set
    #[error("Placement references unknown cargo id {cargo_id}")]
    UnknownCargo { cargo_id: CargoId },

    /// Two cargo items share the same id
    #[error("Duplicate cargo id {cargo_id}")]
    DuplicateCargo { cargo_id: CargoId },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownCargo error
    pub fn unknown_cargo(cargo_id: CargoId) -> Self {
        CalcError::UnknownCargo { cargo_id }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownCargo { .. } => "UNKNOWN_CARGO",
            CalcError::DuplicateCargo { .. } => "DUPLICATE_CARGO",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

/// Reject zero, negative, infinite and NaN values for a numeric field.
pub(crate) fn ensure_positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), reason))
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: e.to_string(),
        }
    }
}
