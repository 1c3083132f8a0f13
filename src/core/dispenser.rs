//! The dispenser record.

use super::history::UsageHistory;
use super::state::DispenserStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque, immutable identifier of a dispenser.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DispenserId(Uuid);

impl DispenserId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DispenserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for DispenserId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for DispenserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DispenserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Ways a dispenser record can contradict its own status.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("dispenser is open but has no opening time")]
    OpenWithoutOpenedAt,

    #[error("dispenser is open but still carries a closing time")]
    OpenWithClosedAt,

    #[error("dispenser is closed but still carries an opening time")]
    ClosedWithOpenedAt,
}

/// Input for creating a dispenser: only the flow rate is chosen by the
/// caller.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDispenser {
    pub flow_volume: f64,
}

impl NewDispenser {
    /// Build the closed, unused dispenser this request describes.
    pub fn into_dispenser(self, created_at: DateTime<Utc>) -> Dispenser {
        Dispenser::new(self.flow_volume, created_at)
    }
}

/// One physical tap.
///
/// A dispenser starts closed with an empty usage history. After that it
/// only changes through the lifecycle controller's patches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dispenser {
    pub id: DispenserId,
    /// Volume units dispensed per second while open
    pub flow_volume: f64,
    pub status: DispenserStatus,
    pub opened_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub usages: UsageHistory,
    pub created_at: DateTime<Utc>,
}

impl Dispenser {
    /// Create a closed dispenser with a fresh id and no usage.
    pub fn new(flow_volume: f64, created_at: DateTime<Utc>) -> Self {
        Self::with_id(DispenserId::new(), flow_volume, created_at)
    }

    pub fn with_id(id: DispenserId, flow_volume: f64, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            flow_volume,
            status: DispenserStatus::Closed,
            opened_at: None,
            closed_at: None,
            usages: UsageHistory::new(),
            created_at,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Check that the timestamps agree with the status.
    ///
    /// Open requires `opened_at` and no `closed_at`; closed requires no
    /// `opened_at`. Every violation found is returned.
    pub fn check_invariants(&self) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        match self.status {
            DispenserStatus::Open => {
                if self.opened_at.is_none() {
                    violations.push(InvariantViolation::OpenWithoutOpenedAt);
                }
                if self.closed_at.is_some() {
                    violations.push(InvariantViolation::OpenWithClosedAt);
                }
            }
            DispenserStatus::Closed => {
                if self.opened_at.is_some() {
                    violations.push(InvariantViolation::ClosedWithOpenedAt);
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}
