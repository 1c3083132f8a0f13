//! The persisted outcome of a transition.

use crate::core::{Dispenser, DispenserId, DispenserStatus, UsageHistory, UsageRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fields a transition rewrites on a dispenser.
///
/// `from` is the status the decision was made against; a store can use
/// it to refuse the patch if the record moved on in the meantime.
/// `usages` is `None` when the history is left as is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispenserPatch {
    pub id: DispenserId,
    pub from: DispenserStatus,
    pub status: DispenserStatus,
    pub opened_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub usages: Option<UsageHistory>,
}

impl DispenserPatch {
    /// The usage record this patch appends, if it closes the dispenser.
    pub fn usage(&self) -> Option<&UsageRecord> {
        self.usages.as_ref().and_then(UsageHistory::last)
    }

    /// Produce the dispenser with this patch applied.
    ///
    /// Pure: the input is left untouched.
    pub fn apply_to(&self, dispenser: &Dispenser) -> Dispenser {
        Dispenser {
            status: self.status,
            opened_at: self.opened_at,
            closed_at: self.closed_at,
            usages: self
                .usages
                .clone()
                .unwrap_or_else(|| dispenser.usages.clone()),
            ..dispenser.clone()
        }
    }
}
