//! Relational validators.
//!
//! These rules compare a value against sibling fields of the map it was read
//! from. When the referenced sibling is absent the rule does not apply and
//! the value passes, so cross-field rules can be declared on optional fields.

use docschema_core::{Node, NodeMap, ValidationError, ValidationResult, Validator};
use std::cmp::Ordering;
use std::sync::Arc;

/// Value must be greater than or equal to the sibling field `key`.
#[derive(Debug, Clone)]
pub struct GreaterThanValidator {
    key: String,
}

impl GreaterThanValidator {
    /// Creates a comparison against the sibling field `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Validator for GreaterThanValidator {
    fn validate(&self, value: &Node, container: Option<&NodeMap>) -> ValidationResult {
        let Some(reference) = container.and_then(|c| c.get(&self.key)) else {
            return Ok(());
        };

        match compare(value, reference) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            _ => Err(ValidationError::relation(self.describe(), value)),
        }
    }

    fn describe(&self) -> String {
        format!("Must be greater than or equal to {}", self.key)
    }
}

/// Duration must fit inside the sibling time window `key`.
///
/// The window is a map with numeric `earliest` and `latest` bounds; the value
/// fits when `latest - earliest >= value`. A sibling that is not such a map
/// does not constrain the value.
#[derive(Debug, Clone)]
pub struct FitsInTimeWindowValidator {
    key: String,
}

impl FitsInTimeWindowValidator {
    /// Creates a check against the sibling time window `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Validator for FitsInTimeWindowValidator {
    fn validate(&self, value: &Node, container: Option<&NodeMap>) -> ValidationResult {
        let Some(container) = container else {
            return Ok(());
        };
        let Some(window) = container.get(&self.key) else {
            return Ok(());
        };

        let Some((earliest, latest)) = window_bounds(window) else {
            return Ok(());
        };

        let fits = value
            .as_f64()
            .is_some_and(|duration| latest - earliest >= duration);

        if fits {
            Ok(())
        } else {
            Err(ValidationError::relation(
                self.describe(),
                &Node::Map(container.clone()),
            ))
        }
    }

    fn describe(&self) -> String {
        format!("Must fit in {}", self.key)
    }
}

/// An array of time windows must be ordered and non-overlapping.
///
/// Adjacent windows may touch: `window[i].latest == window[i + 1].earliest`
/// is accepted. Null stands for an absent list and passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeWindowsNonOverlappingValidator;

impl Validator for TimeWindowsNonOverlappingValidator {
    fn validate(&self, value: &Node, _container: Option<&NodeMap>) -> ValidationResult {
        let windows = match value {
            Node::Null => return Ok(()),
            Node::List(items) => items,
            _ => {
                return Err(ValidationError::type_mismatch(
                    "Time windows must be an array",
                    value,
                ));
            }
        };

        for pair in windows.windows(2) {
            let ordered = match (window_bounds(&pair[0]), window_bounds(&pair[1])) {
                (Some((_, current_latest)), Some((next_earliest, _))) => {
                    current_latest <= next_earliest
                }
                _ => false,
            };
            if !ordered {
                return Err(ValidationError::relation(self.describe(), value));
            }
        }

        Ok(())
    }

    fn describe(&self) -> String {
        "Time windows must be ordered and non-overlapping".to_string()
    }
}

/// Orders two nodes when both are numbers or both are strings.
fn compare(a: &Node, b: &Node) -> Option<Ordering> {
    match (a, b) {
        (Node::String(x), Node::String(y)) => Some(x.cmp(y)),
        _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
    }
}

/// Extracts `(earliest, latest)` from a time window map.
fn window_bounds(window: &Node) -> Option<(f64, f64)> {
    let earliest = window.get("earliest")?.as_f64()?;
    let latest = window.get("latest")?.as_f64()?;
    Some((earliest, latest))
}

/// Shared "not less than sibling" check.
pub fn greater_than(key: impl Into<String>) -> Arc<dyn Validator> {
    Arc::new(GreaterThanValidator::new(key))
}

/// Shared "fits in sibling window" check.
pub fn fits_in_time_window(key: impl Into<String>) -> Arc<dyn Validator> {
    Arc::new(FitsInTimeWindowValidator::new(key))
}

/// Shared ordered-windows check.
pub fn time_windows_non_overlapping() -> Arc<dyn Validator> {
    Arc::new(TimeWindowsNonOverlappingValidator)
}
