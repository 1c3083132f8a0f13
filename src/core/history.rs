//! Usage history tracking.
//!
//! Every completed open interval of a dispenser is kept as an immutable
//! [`UsageRecord`]. The [`UsageHistory`] holding them only ever grows:
//! `record` returns a new history with one more entry and leaves the
//! existing one untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of one completed open interval and what it cost.
///
/// `flow_volume` is the dispenser's rate at the moment the interval was
/// closed. It is never re-read from the dispenser afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    /// Volume units dispensed per second during the interval
    pub flow_volume: f64,
    /// When the dispenser was opened
    pub opened_at: DateTime<Utc>,
    /// When the dispenser was closed
    pub closed_at: DateTime<Utc>,
    /// Cost of the interval
    pub total_spent: f64,
}

impl UsageRecord {
    /// Length of the interval in seconds. Negative if the timestamps are
    /// out of order.
    pub fn elapsed_seconds(&self) -> f64 {
        crate::billing::elapsed_seconds(self.opened_at, self.closed_at)
    }

    /// Volume dispensed over the interval.
    pub fn volume(&self) -> f64 {
        self.elapsed_seconds() * self.flow_volume
    }
}

/// Ordered, append-only history of usage records.
///
/// Insertion order is chronological order. Serialized as a plain list.
///
/// # Example
///
/// ```rust
/// use tapmeter::core::{UsageHistory, UsageRecord};
/// use chrono::{Duration, Utc};
///
/// let opened_at = Utc::now();
/// let history = UsageHistory::new();
/// let history = history.record(UsageRecord {
///     flow_volume: 0.5,
///     opened_at,
///     closed_at: opened_at + Duration::seconds(4),
///     total_spent: 2.0,
/// });
///
/// assert_eq!(history.len(), 1);
/// assert_eq!(history.total_spent(), 2.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageHistory {
    records: Vec<UsageRecord>,
}

impl UsageHistory {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a usage, returning a new history.
    ///
    /// The existing history is not modified.
    pub fn record(&self, usage: UsageRecord) -> Self {
        let mut records = self.records.clone();
        records.push(usage);
        Self { records }
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[UsageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recently recorded usage.
    pub fn last(&self) -> Option<&UsageRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UsageRecord> {
        self.records.iter()
    }

    /// Sum of `total_spent` over every record, in insertion order.
    ///
    /// Returns `0.0` for an empty history.
    pub fn total_spent(&self) -> f64 {
        self.records
            .iter()
            .fold(0.0, |acc, usage| acc + usage.total_spent)
    }

    /// Sum of the volume dispensed over every record.
    pub fn total_volume(&self) -> f64 {
        self.records.iter().fold(0.0, |acc, usage| acc + usage.volume())
    }
}

impl<'a> IntoIterator for &'a UsageHistory {
    type Item = &'a UsageRecord;
    type IntoIter = std::slice::Iter<'a, UsageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl From<Vec<UsageRecord>> for UsageHistory {
    fn from(records: Vec<UsageRecord>) -> Self {
        Self { records }
    }
}
