//! Usage-based billing.
//!
//! - [`compute_cost`]: pure cost of one open interval
//! - [`summarize_spending`]: total spend over a dispenser's history
//! - [`PricingConfig`]: where the unit price comes from
//!
//! Both computations are total functions. Odd inputs, such as an
//! interval that ends before it starts, produce odd numbers rather than
//! errors.

mod config;
mod cost;
mod spending;

pub use config::{ConfigError, PricingConfig, CONFIG_ENV_VAR};
pub use cost::{compute_cost, elapsed_seconds, Pricing, DEFAULT_UNIT_PRICE};
pub use spending::{summarize_spending, SpendingSummary};
