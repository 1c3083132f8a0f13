//! Validation rules for dispenser input, using Validation.

use crate::billing::Pricing;
use crate::core::NewDispenser;
use crate::validation::builder::RulesBuilder;
use crate::validation::violations::Violation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Type alias for validation check functions
pub type ValidationCheck<T> =
    Box<dyn Fn(&T) -> Validation<(), NonEmptyVec<Violation>> + Send + Sync>;

/// A set of checks over values of type `T`.
/// Uses Validation to accumulate ALL violations.
pub struct Rules<T> {
    pub(crate) checks: Vec<ValidationCheck<T>>,
}

impl<T> Rules<T> {
    /// Run every check, accumulating ALL violations.
    /// Returns Validation::Success(()) if all checks pass.
    /// Returns Validation::Failure with ALL violations if any fail.
    pub fn enforce(&self, value: &T) -> Validation<(), NonEmptyVec<Violation>> {
        if self.checks.is_empty() {
            return Validation::success(());
        }

        let checks: Vec<Validation<(), NonEmptyVec<Violation>>> =
            self.checks.iter().map(|check| check(value)).collect();

        Validation::all_vec(checks).map(|_| ())
    }

    /// Same as [`Rules::enforce`], flattened into a `Result`.
    pub fn check(&self, value: &T) -> Result<(), Vec<Violation>> {
        match self.enforce(value) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => Err(errors.iter().cloned().collect()),
        }
    }
}

/// Rules a create request must satisfy: a finite, positive flow volume.
pub fn new_dispenser_rules() -> Rules<NewDispenser> {
    RulesBuilder::new()
        .require_finite("flowVolume", |req: &NewDispenser| req.flow_volume)
        .require_positive("flowVolume", |req: &NewDispenser| req.flow_volume)
        .build()
}

/// Rules for a configured price: finite and not negative.
pub fn pricing_rules() -> Rules<Pricing> {
    RulesBuilder::new()
        .require_finite("unit_price", |p: &Pricing| p.unit_price)
        .require_non_negative("unit_price", |p: &Pricing| p.unit_price)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_flow_volume_passes() {
        let rules = new_dispenser_rules();
        let result = rules.enforce(&NewDispenser { flow_volume: 0.064 });
        assert!(result.is_success());
    }

    #[test]
    fn zero_flow_volume_is_rejected() {
        let rules = new_dispenser_rules();
        let violations = rules
            .check(&NewDispenser { flow_volume: 0.0 })
            .unwrap_err();

        assert_eq!(
            violations,
            vec![Violation::NotPositive {
                field: "flowVolume",
                value: 0.0
            }]
        );
    }

    #[test]
    fn nan_flow_volume_accumulates_all_violations() {
        let rules = new_dispenser_rules();
        let result = rules.enforce(&NewDispenser {
            flow_volume: f64::NAN,
        });

        match result {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, Violation::NotFinite { .. })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, Violation::NotPositive { .. })));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn infinite_flow_volume_is_not_finite() {
        let violations = new_dispenser_rules()
            .check(&NewDispenser {
                flow_volume: f64::INFINITY,
            })
            .unwrap_err();

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field(), Some("flowVolume"));
        assert!(matches!(violations[0], Violation::NotFinite { .. }));
    }

    #[test]
    fn free_pricing_is_allowed() {
        assert!(pricing_rules().check(&Pricing::new(0.0)).is_ok());
    }

    #[test]
    fn negative_pricing_is_rejected() {
        let violations = pricing_rules().check(&Pricing::new(-1.0)).unwrap_err();
        assert_eq!(
            violations,
            vec![Violation::Negative {
                field: "unit_price",
                value: -1.0
            }]
        );
    }

    #[test]
    fn custom_predicate_check_works() {
        let rules = RulesBuilder::new()
            .require_pred(
                |req: &NewDispenser| req.flow_volume < 10.0,
                "flow volume is implausibly high".to_string(),
            )
            .build();

        assert!(rules.check(&NewDispenser { flow_volume: 1.0 }).is_ok());

        let result = rules.enforce(&NewDispenser { flow_volume: 50.0 });
        assert!(result.is_failure());
        if let Validation::Failure(errors) = result {
            assert!(errors
                .iter()
                .any(|e| matches!(e, Violation::CustomCheckFailed { .. })));
        }
    }

    #[test]
    fn empty_rules_accept_anything() {
        let rules: Rules<NewDispenser> = RulesBuilder::new().build();
        assert!(rules
            .check(&NewDispenser {
                flow_volume: -3.0
            })
            .is_ok());
    }
}
