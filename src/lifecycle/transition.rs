//! Edges of the dispenser state machine.

use crate::core::{Dispenser, DispenserId, DispenserStatus, Guard, InvariantViolation};

/// Errors that can occur during transitions
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransitionError {
    /// The dispenser is already in the requested status. A rejected
    /// request, not a defect.
    #[error("Dispenser with id: {id} was already {status}")]
    AlreadyInState {
        id: DispenserId,
        status: DispenserStatus,
    },

    /// The stored record contradicts its own status. Points to a bug in
    /// whatever wrote the record.
    #[error("Dispenser with id: {id} is in an invalid state: {violation}")]
    InvalidState {
        id: DispenserId,
        violation: InvariantViolation,
    },
}

/// A guard paired with the invariant it protects.
pub struct Requirement {
    pub guard: Guard<Dispenser>,
    pub violation: InvariantViolation,
}

/// A transition from one status to the other.
///
/// There are exactly two: `closed -> open` and `open -> closed`.
pub struct Transition {
    pub from: DispenserStatus,
    pub to: DispenserStatus,
    pub requires: Vec<Requirement>,
}

impl Transition {
    /// The edge that ends in `target`.
    pub fn towards(target: DispenserStatus) -> Self {
        match target {
            DispenserStatus::Open => Self::open(),
            DispenserStatus::Closed => Self::close(),
        }
    }

    /// `closed -> open`. No requirement beyond being closed.
    pub fn open() -> Self {
        Self {
            from: DispenserStatus::Closed,
            to: DispenserStatus::Open,
            requires: Vec::new(),
        }
    }

    /// `open -> closed`. The open interval must have a start.
    pub fn close() -> Self {
        Self {
            from: DispenserStatus::Open,
            to: DispenserStatus::Closed,
            requires: vec![Requirement {
                guard: Guard::new(|d: &Dispenser| d.opened_at.is_some()),
                violation: InvariantViolation::OpenWithoutOpenedAt,
            }],
        }
    }

    /// Check if this transition can execute from the dispenser's state (pure)
    pub fn can_execute(&self, dispenser: &Dispenser) -> bool {
        self.check(dispenser).is_ok()
    }

    /// Like [`Transition::can_execute`] but says why not.
    pub fn check(&self, dispenser: &Dispenser) -> Result<(), TransitionError> {
        if dispenser.status != self.from {
            return Err(TransitionError::AlreadyInState {
                id: dispenser.id,
                status: dispenser.status,
            });
        }

        match self.requires.iter().find(|r| !r.guard.check(dispenser)) {
            Some(failed) => Err(TransitionError::InvalidState {
                id: dispenser.id,
                violation: failed.violation.clone(),
            }),
            None => Ok(()),
        }
    }
}
