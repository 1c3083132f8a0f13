//! Versioned snapshots of dispenser records.
//!
//! A snapshot is the form in which a storage collaborator persists a
//! dispenser. JSON is readable and matches the dispenser document shape;
//! the binary form is compact. Restoring a snapshot checks the format
//! version and the record's status invariants before handing it back.

use crate::core::Dispenser;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable snapshot of one dispenser.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispenserSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// The dispenser as it was at `taken_at`
    pub dispenser: Dispenser,
}

impl DispenserSnapshot {
    /// Capture `dispenser` in the current format version.
    pub fn capture(dispenser: &Dispenser, taken_at: DateTime<Utc>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            taken_at,
            dispenser: dispenser.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
    }

    /// Take the dispenser back out, checking version and invariants.
    pub fn restore(self) -> Result<Dispenser, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        self.dispenser
            .check_invariants()
            .map_err(SnapshotError::ValidationFailed)?;

        Ok(self.dispenser)
    }
}
