//! Errors surfaced by the service shell.

use crate::core::DispenserId;
use crate::lifecycle::TransitionError;
use crate::service::store::StoreError;
use crate::validation::Violation;
use thiserror::Error;

/// Errors returned by service operations
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("The dispenser with id {id} not found")]
    NotFound { id: DispenserId },

    #[error("invalid request: {}", list(.0))]
    InvalidRequest(Vec<Violation>),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn list(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ServiceError {
    /// Whether the caller's request was at fault, as opposed to the
    /// service or its stored data.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::InvalidRequest(_)
                | Self::Transition(TransitionError::AlreadyInState { .. })
                | Self::Store(StoreError::Conflict { .. })
        )
    }
}
