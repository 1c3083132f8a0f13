//! Spending summary over a dispenser's usage history.

use crate::core::{Dispenser, UsageHistory};
use serde::{Deserialize, Serialize};

/// Total spend of a dispenser together with the records it was summed from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpendingSummary {
    pub amount: f64,
    pub usages: UsageHistory,
}

/// Summarize a dispenser's usage history.
///
/// `amount` is the sum of every record's `total_spent` (zero when the
/// history is empty); `usages` is the history as stored, same order.
///
/// # Example
///
/// ```rust
/// use tapmeter::billing::summarize_spending;
/// use tapmeter::core::Dispenser;
/// use chrono::Utc;
///
/// let summary = summarize_spending(&Dispenser::new(0.064, Utc::now()));
/// assert_eq!(summary.amount, 0.0);
/// assert!(summary.usages.is_empty());
/// ```
pub fn summarize_spending(dispenser: &Dispenser) -> SpendingSummary {
    SpendingSummary {
        amount: dispenser.usages.total_spent(),
        usages: dispenser.usages.clone(),
    }
}
