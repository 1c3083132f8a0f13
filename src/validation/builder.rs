//! Builder API for creating validation rules.

use crate::validation::rules::{Rules, ValidationCheck};
use crate::validation::violations::Violation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for creating validation rules
pub struct RulesBuilder<T> {
    checks: Vec<ValidationCheck<T>>,
}

impl<T> RulesBuilder<T> {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Add a custom validation check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&T) -> Validation<(), NonEmptyVec<Violation>> + Send + Sync + 'static,
    {
        self.checks.push(Box::new(check));
        self
    }

    /// Add a simple predicate check with error message
    pub fn require_pred<F>(mut self, predicate: F, error_msg: String) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let check = move |value: &T| {
            if predicate(value) {
                Validation::success(())
            } else {
                Validation::fail(Violation::CustomCheckFailed {
                    message: error_msg.clone(),
                })
            }
        };
        self.checks.push(Box::new(check));
        self
    }

    /// Require a numeric field to be finite
    pub fn require_finite<F>(self, field: &'static str, get: F) -> Self
    where
        F: Fn(&T) -> f64 + Send + Sync + 'static,
    {
        self.require(move |value: &T| {
            let value = get(value);
            if value.is_finite() {
                Validation::success(())
            } else {
                Validation::fail(Violation::NotFinite { field, value })
            }
        })
    }

    /// Require a numeric field to be strictly greater than zero.
    ///
    /// NaN fails this check as well as the finiteness one.
    pub fn require_positive<F>(self, field: &'static str, get: F) -> Self
    where
        F: Fn(&T) -> f64 + Send + Sync + 'static,
    {
        self.require(move |value: &T| {
            let value = get(value);
            if value > 0.0 {
                Validation::success(())
            } else {
                Validation::fail(Violation::NotPositive { field, value })
            }
        })
    }

    /// Require a numeric field to be zero or more
    pub fn require_non_negative<F>(self, field: &'static str, get: F) -> Self
    where
        F: Fn(&T) -> f64 + Send + Sync + 'static,
    {
        self.require(move |value: &T| {
            let value = get(value);
            if value >= 0.0 {
                Validation::success(())
            } else {
                Validation::fail(Violation::Negative { field, value })
            }
        })
    }

    /// Build the rules
    pub fn build(self) -> Rules<T> {
        Rules {
            checks: self.checks,
        }
    }
}

impl<T> Default for RulesBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
