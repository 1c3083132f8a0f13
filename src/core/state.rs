//! Dispenser status, the two states of the lifecycle machine.
//!
//! A dispenser is either pouring (`Open`) or idle (`Closed`). Status
//! values are plain `Copy` data so they can be compared, logged and
//! carried inside patches without ceremony.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a dispenser.
///
/// Serialized as `"open"` / `"close"`, the names used by the dispenser
/// API. `"closed"` is accepted when deserializing.
///
/// # Example
///
/// ```rust
/// use tapmeter::core::DispenserStatus;
///
/// let status: DispenserStatus = "open".parse().unwrap();
/// assert!(status.is_open());
/// assert_eq!(status.toggled(), DispenserStatus::Closed);
/// assert_eq!(DispenserStatus::default(), DispenserStatus::Closed);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum DispenserStatus {
    #[serde(rename = "open")]
    Open,
    #[default]
    #[serde(rename = "close", alias = "closed")]
    Closed,
}

impl DispenserStatus {
    /// Name used on the wire and in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "close",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// The only state reachable from this one.
    pub fn toggled(&self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }
}

impl fmt::Display for DispenserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no dispenser status.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown dispenser status '{0}', expected 'open' or 'close'")]
pub struct UnknownStatus(pub String);

impl FromStr for DispenserStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "close" | "closed" => Ok(Self::Closed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}
