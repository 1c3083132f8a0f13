//! The dispenser lifecycle state machine.
//!
//! Two states, `closed` (initial) and `open`, joined by two edges:
//!
//! - `closed -> open`: stamps the opening time, nothing else.
//! - `open -> closed`: prices the interval and appends a usage record.
//!
//! Self-loops are rejected with [`TransitionError::AlreadyInState`].
//!
//! [`apply_transition`] is a pure decision: it takes the current record
//! and the caller's "now" and returns a [`DispenserPatch`]. Persisting
//! the patch is the caller's job.

mod controller;
mod patch;
mod transition;

pub use controller::apply_transition;
pub use patch::DispenserPatch;
pub use transition::{Requirement, Transition, TransitionError};
