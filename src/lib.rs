//! Tapmeter: lifecycle and usage billing for metered dispensers
//!
//! A dispenser pours at a fixed flow rate while open and is billed by how
//! long it stayed open. Tapmeter follows the "pure core, imperative shell"
//! split: the decision logic is a set of pure functions over values the
//! caller supplies (including the current time), while storage, clock and
//! logging live in a thin shell around it.
//!
//! # Core Concepts
//!
//! - **Lifecycle**: `closed -> open -> closed`, decided by [`apply_transition`]
//! - **Billing**: `elapsed seconds × flow volume × unit price`, see [`compute_cost`]
//! - **Spending**: total spend over the append-only usage history
//!
//! # Example
//!
//! ```rust
//! use tapmeter::billing::{summarize_spending, Pricing};
//! use tapmeter::core::{Dispenser, DispenserStatus};
//! use tapmeter::lifecycle::apply_transition;
//! use chrono::{DateTime, Utc};
//!
//! let opened_at: DateTime<Utc> = "2023-06-06T11:03:19.349Z".parse().unwrap();
//! let closed_at: DateTime<Utc> = "2023-06-06T11:03:28.318Z".parse().unwrap();
//! let pricing = Pricing::new(12.25);
//!
//! let dispenser = Dispenser::new(0.006, opened_at);
//! let dispenser = apply_transition(&dispenser, DispenserStatus::Open, opened_at, &pricing)
//!     .unwrap()
//!     .apply_to(&dispenser);
//! let dispenser = apply_transition(&dispenser, DispenserStatus::Closed, closed_at, &pricing)
//!     .unwrap()
//!     .apply_to(&dispenser);
//!
//! let summary = summarize_spending(&dispenser);
//! assert_eq!(summary.usages.len(), 1);
//! assert!((summary.amount - 0.6592215).abs() < 1e-12);
//! ```

pub mod billing;
pub mod core;
pub mod lifecycle;
pub mod service;
pub mod snapshot;
pub mod validation;

// Re-export commonly used types
pub use self::billing::{compute_cost, summarize_spending, Pricing, SpendingSummary};
pub use self::core::{Dispenser, DispenserId, DispenserStatus, UsageHistory, UsageRecord};
pub use self::lifecycle::{apply_transition, DispenserPatch, TransitionError};
