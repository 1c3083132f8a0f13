//! Accumulating validation of dispenser input.
//!
//! Rules are built on Stillwater's `Validation` type so every broken rule
//! is reported at once instead of stopping at the first one. An outer API
//! layer runs these before calling into the core.
//!
//! # Example
//!
//! ```rust
//! use tapmeter::core::NewDispenser;
//! use tapmeter::validation::new_dispenser_rules;
//!
//! let rules = new_dispenser_rules();
//! assert!(rules.check(&NewDispenser { flow_volume: 0.064 }).is_ok());
//! assert!(rules.check(&NewDispenser { flow_volume: -1.0 }).is_err());
//! ```

pub mod builder;
pub mod rules;
pub mod violations;

pub use builder::RulesBuilder;
pub use rules::{new_dispenser_rules, pricing_rules, Rules, ValidationCheck};
pub use violations::Violation;
