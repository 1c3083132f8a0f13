//! Core dispenser types.
//!
//! This module contains the data the lifecycle and billing logic work on:
//! - The dispenser record and its identifier
//! - Dispenser status, the states of the lifecycle machine
//! - Guard predicates for transition control
//! - Append-only usage history
//!
//! Nothing in this module performs I/O or reads the clock.

mod dispenser;
mod guard;
mod history;
mod state;

pub use dispenser::{Dispenser, DispenserId, InvariantViolation, NewDispenser};
pub use guard::Guard;
pub use history::{UsageHistory, UsageRecord};
pub use state::{DispenserStatus, UnknownStatus};
