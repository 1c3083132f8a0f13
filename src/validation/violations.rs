//! Input rule violations.

use thiserror::Error;

/// A single broken input rule.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Violation {
    #[error("{field} must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("Custom check failed: {message}")]
    CustomCheckFailed { message: String },
}

impl Violation {
    /// Name of the offending field, if the violation concerns one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::NotFinite { field, .. }
            | Self::NotPositive { field, .. }
            | Self::Negative { field, .. } => Some(field),
            Self::CustomCheckFailed { .. } => None,
        }
    }
}
