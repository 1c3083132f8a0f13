//! Deciding the next state of a dispenser.

use crate::billing::{compute_cost, Pricing};
use crate::core::{Dispenser, DispenserStatus, InvariantViolation, UsageRecord};
use crate::lifecycle::patch::DispenserPatch;
use crate::lifecycle::transition::{Transition, TransitionError};
use chrono::{DateTime, Utc};

/// Decide the effect of moving `dispenser` to `requested` at `timestamp`.
///
/// Opening stamps `opened_at` and clears `closed_at`. Closing prices the
/// interval from `opened_at` to `timestamp` at the dispenser's current
/// flow rate and `pricing.unit_price`, and appends the resulting
/// [`UsageRecord`] to the history carried in the patch.
///
/// The dispenser itself is not modified; apply the returned patch with
/// [`DispenserPatch::apply_to`] or hand it to a store.
///
/// # Errors
///
/// - [`TransitionError::AlreadyInState`] if `requested` is the current status.
/// - [`TransitionError::InvalidState`] if an open dispenser has no `opened_at`.
///
/// # Example
///
/// ```rust
/// use tapmeter::billing::Pricing;
/// use tapmeter::core::{Dispenser, DispenserStatus};
/// use tapmeter::lifecycle::apply_transition;
/// use chrono::{Duration, Utc};
///
/// let opened_at = Utc::now();
/// let dispenser = Dispenser::new(0.5, opened_at);
///
/// let patch = apply_transition(&dispenser, DispenserStatus::Open, opened_at, &Pricing::new(2.0)).unwrap();
/// let dispenser = patch.apply_to(&dispenser);
///
/// let closed_at = opened_at + Duration::seconds(10);
/// let patch = apply_transition(&dispenser, DispenserStatus::Closed, closed_at, &Pricing::new(2.0)).unwrap();
///
/// assert_eq!(patch.usage().map(|u| u.total_spent), Some(10.0));
/// ```
pub fn apply_transition(
    dispenser: &Dispenser,
    requested: DispenserStatus,
    timestamp: DateTime<Utc>,
    pricing: &Pricing,
) -> Result<DispenserPatch, TransitionError> {
    Transition::towards(requested).check(dispenser)?;

    let patch = match requested {
        DispenserStatus::Open => DispenserPatch {
            id: dispenser.id,
            from: dispenser.status,
            status: DispenserStatus::Open,
            opened_at: Some(timestamp),
            closed_at: None,
            usages: None,
        },
        DispenserStatus::Closed => {
            let usage = close_interval(dispenser, timestamp, pricing)?;
            DispenserPatch {
                id: dispenser.id,
                from: dispenser.status,
                status: DispenserStatus::Closed,
                opened_at: None,
                closed_at: Some(timestamp),
                usages: Some(dispenser.usages.record(usage)),
            }
        }
    };

    Ok(patch)
}

fn close_interval(
    dispenser: &Dispenser,
    closed_at: DateTime<Utc>,
    pricing: &Pricing,
) -> Result<UsageRecord, TransitionError> {
    // Guarded by Transition::close; re-checked rather than defaulted.
    let opened_at = dispenser
        .opened_at
        .ok_or(TransitionError::InvalidState {
            id: dispenser.id,
            violation: InvariantViolation::OpenWithoutOpenedAt,
        })?;

    Ok(UsageRecord {
        flow_volume: dispenser.flow_volume,
        opened_at,
        closed_at,
        total_spent: compute_cost(
            opened_at,
            closed_at,
            dispenser.flow_volume,
            pricing.unit_price,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn open_dispenser(flow_volume: f64, opened_at: DateTime<Utc>) -> Dispenser {
        let dispenser = Dispenser::new(flow_volume, opened_at);
        apply_transition(&dispenser, DispenserStatus::Open, opened_at, &Pricing::default())
            .unwrap()
            .apply_to(&dispenser)
    }

    #[test]
    fn opening_closed_dispenser_sets_opened_at() {
        let dispenser = Dispenser::new(0.1, Utc::now());
        let at = ts("2023-06-06T11:03:19.349Z");

        let patch =
            apply_transition(&dispenser, DispenserStatus::Open, at, &Pricing::default()).unwrap();

        assert_eq!(patch.status, DispenserStatus::Open);
        assert_eq!(patch.from, DispenserStatus::Closed);
        assert_eq!(patch.opened_at, Some(at));
        assert_eq!(patch.closed_at, None);
        assert!(patch.usages.is_none());
        assert!(patch.usage().is_none());
    }

    #[test]
    fn opening_clears_previous_closed_at() {
        let mut dispenser = Dispenser::new(0.1, Utc::now());
        dispenser.closed_at = Some(ts("2023-06-06T10:00:00Z"));

        let next = apply_transition(
            &dispenser,
            DispenserStatus::Open,
            ts("2023-06-06T11:00:00Z"),
            &Pricing::default(),
        )
        .unwrap()
        .apply_to(&dispenser);

        assert!(next.closed_at.is_none());
        assert!(next.check_invariants().is_ok());
    }

    #[test]
    fn closing_bills_reference_interval() {
        let dispenser = open_dispenser(0.006, ts("2023-06-06T11:03:19.349Z"));
        let closed_at = ts("2023-06-06T11:03:28.318Z");

        let patch = apply_transition(
            &dispenser,
            DispenserStatus::Closed,
            closed_at,
            &Pricing::new(12.25),
        )
        .unwrap();

        assert_eq!(patch.status, DispenserStatus::Closed);
        assert_eq!(patch.opened_at, None);
        assert_eq!(patch.closed_at, Some(closed_at));

        let usage = patch.usage().unwrap();
        assert_eq!(usage.flow_volume, 0.006);
        assert_eq!(usage.opened_at, ts("2023-06-06T11:03:19.349Z"));
        assert_eq!(usage.closed_at, closed_at);
        assert!((usage.total_spent - 0.6592215).abs() < 1e-12);
    }

    #[test]
    fn closing_appends_exactly_one_record() {
        let opened_at = ts("2023-06-06T11:00:00Z");
        let mut dispenser = open_dispenser(0.1, opened_at);
        let earlier = dispenser.usages.record(UsageRecord {
            flow_volume: 0.1,
            opened_at: ts("2023-06-06T10:00:00Z"),
            closed_at: ts("2023-06-06T10:00:05Z"),
            total_spent: 6.125,
        });
        dispenser.usages = earlier.clone();

        let patch = apply_transition(
            &dispenser,
            DispenserStatus::Closed,
            opened_at + Duration::seconds(3),
            &Pricing::default(),
        )
        .unwrap();

        let usages = patch.usages.as_ref().unwrap();
        assert_eq!(usages.len(), 2);
        assert_eq!(usages.records()[0], earlier.records()[0]);
        assert_eq!(dispenser.usages.len(), 1);
    }

    #[test]
    fn opening_open_dispenser_is_rejected_and_leaves_it_unchanged() {
        let dispenser = open_dispenser(0.1, ts("2023-06-06T11:00:00Z"));
        let before = dispenser.clone();

        let err = apply_transition(
            &dispenser,
            DispenserStatus::Open,
            ts("2023-06-06T12:00:00Z"),
            &Pricing::default(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            TransitionError::AlreadyInState {
                id: dispenser.id,
                status: DispenserStatus::Open,
            }
        );
        assert_eq!(dispenser, before);
    }

    #[test]
    fn closing_closed_dispenser_is_rejected() {
        let dispenser = Dispenser::new(0.1, Utc::now());

        let err = apply_transition(
            &dispenser,
            DispenserStatus::Closed,
            Utc::now(),
            &Pricing::default(),
        )
        .unwrap_err();

        assert!(matches!(err, TransitionError::AlreadyInState { .. }));
    }

    #[test]
    fn closing_without_opened_at_is_invalid_state() {
        let mut dispenser = Dispenser::new(0.1, Utc::now());
        dispenser.status = DispenserStatus::Open;

        let err = apply_transition(
            &dispenser,
            DispenserStatus::Closed,
            Utc::now(),
            &Pricing::default(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            TransitionError::InvalidState {
                id: dispenser.id,
                violation: InvariantViolation::OpenWithoutOpenedAt,
            }
        );
    }

    #[test]
    fn closing_before_opening_bills_negative() {
        let dispenser = open_dispenser(0.006, ts("2023-06-06T11:03:28.318Z"));

        let patch = apply_transition(
            &dispenser,
            DispenserStatus::Closed,
            ts("2023-06-06T11:03:19.349Z"),
            &Pricing::new(12.25),
        )
        .unwrap();

        let spent = patch.usage().unwrap().total_spent;
        assert!((spent + 0.6592215).abs() < 1e-12);
    }

    #[test]
    fn usage_keeps_flow_rate_at_close_time() {
        let opened_at = ts("2023-06-06T11:00:00Z");
        let mut dispenser = open_dispenser(0.1, opened_at);

        let first = apply_transition(
            &dispenser,
            DispenserStatus::Closed,
            opened_at + Duration::seconds(10),
            &Pricing::default(),
        )
        .unwrap();
        dispenser = first.apply_to(&dispenser);

        // Rate changed by an outside actor between cycles.
        dispenser.flow_volume = 0.2;
        dispenser = apply_transition(
            &dispenser,
            DispenserStatus::Open,
            opened_at + Duration::seconds(20),
            &Pricing::default(),
        )
        .unwrap()
        .apply_to(&dispenser);
        dispenser = apply_transition(
            &dispenser,
            DispenserStatus::Closed,
            opened_at + Duration::seconds(30),
            &Pricing::default(),
        )
        .unwrap()
        .apply_to(&dispenser);

        let rates: Vec<f64> = dispenser.usages.iter().map(|u| u.flow_volume).collect();
        assert_eq!(rates, vec![0.1, 0.2]);
        assert_eq!(dispenser.usages.len(), 2);
    }
}
