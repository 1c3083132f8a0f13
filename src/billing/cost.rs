//! Cost of a single open interval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Price per volume unit used by the reference deployment.
pub const DEFAULT_UNIT_PRICE: f64 = 12.25;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;
const MILLIS_PER_SECOND: f64 = 1_000.0;

/// Price applied to dispensed volume.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    /// Monetary cost per volume unit
    pub unit_price: f64,
}

impl Pricing {
    pub fn new(unit_price: f64) -> Self {
        Self { unit_price }
    }
}

impl Default for Pricing {
    fn default() -> Self {
        Self::new(DEFAULT_UNIT_PRICE)
    }
}

/// Seconds from `opened_at` to `closed_at`, with sub-second precision.
///
/// Negative when `closed_at` is before `opened_at`.
pub fn elapsed_seconds(opened_at: DateTime<Utc>, closed_at: DateTime<Utc>) -> f64 {
    let elapsed = closed_at.signed_duration_since(opened_at);
    match elapsed.num_nanoseconds() {
        Some(nanos) => nanos as f64 / NANOS_PER_SECOND,
        // Spans beyond ~292 years overflow nanoseconds.
        None => elapsed.num_milliseconds() as f64 / MILLIS_PER_SECOND,
    }
}

/// Cost of dispensing at `flow_volume` from `opened_at` to `closed_at`.
///
/// Computed as `elapsed_seconds * flow_volume * unit_price`. No rounding
/// and no clamping: an interval whose end precedes its start yields a
/// negative cost.
///
/// # Example
///
/// ```rust
/// use tapmeter::billing::compute_cost;
/// use chrono::{DateTime, Utc};
///
/// let opened_at: DateTime<Utc> = "2023-06-06T11:03:19.349Z".parse().unwrap();
/// let closed_at: DateTime<Utc> = "2023-06-06T11:03:28.318Z".parse().unwrap();
///
/// let cost = compute_cost(opened_at, closed_at, 0.006, 12.25);
/// assert!((cost - 0.6592215).abs() < 1e-12);
/// ```
pub fn compute_cost(
    opened_at: DateTime<Utc>,
    closed_at: DateTime<Utc>,
    flow_volume: f64,
    unit_price: f64,
) -> f64 {
    let volume = elapsed_seconds(opened_at, closed_at) * flow_volume;
    volume * unit_price
}
