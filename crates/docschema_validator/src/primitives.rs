//! Primitive validators.
//!
//! Leaf checks over a single node:
//! - Type checks: boolean, integer, float, string, email, date, null
//! - Predicates: non-negative, allowed values, inclusive range, length bounds
//! - Empty: asserts that no data was supplied at all

use chrono::NaiveDate;
use docschema_core::{Node, NodeMap, ValidationError, ValidationResult, Validator};
use regex::Regex;
use std::sync::{Arc, LazyLock};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A([^@\s]+)@((?:[-a-z0-9]+\.)+[a-z]{2,})\z").expect("email pattern compiles")
});

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})/(\d{2})/(\d{2})$").expect("date pattern compiles")
});

/// Value must be `true` or `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanValidator;

impl Validator for BooleanValidator {
    fn validate(&self, value: &Node, _container: Option<&NodeMap>) -> ValidationResult {
        match value {
            Node::Bool(_) => Ok(()),
            _ => Err(ValidationError::type_mismatch("Value is not a boolean", value)),
        }
    }

    fn describe(&self) -> String {
        "Must be a boolean".to_string()
    }

    fn type_label(&self) -> Option<String> {
        Some("Boolean".to_string())
    }
}

/// Value must be an integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerValidator;

impl Validator for IntegerValidator {
    fn validate(&self, value: &Node, _container: Option<&NodeMap>) -> ValidationResult {
        match value {
            Node::Int(_) => Ok(()),
            _ => Err(ValidationError::type_mismatch("Value is not an integer", value)),
        }
    }

    fn describe(&self) -> String {
        "Must be an integer".to_string()
    }

    fn type_label(&self) -> Option<String> {
        Some("Number (integer)".to_string())
    }
}

/// Value must be numeric; integers are accepted as floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatValidator;

impl Validator for FloatValidator {
    fn validate(&self, value: &Node, _container: Option<&NodeMap>) -> ValidationResult {
        match value {
            Node::Int(_) | Node::Float(_) => Ok(()),
            _ => Err(ValidationError::type_mismatch(
                "Value is not a floating point value",
                value,
            )),
        }
    }

    fn describe(&self) -> String {
        "Must be a floating point value".to_string()
    }

    fn type_label(&self) -> Option<String> {
        Some("Number (float)".to_string())
    }
}

/// Numeric value must be zero or greater.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonNegativeValidator;

impl Validator for NonNegativeValidator {
    fn validate(&self, value: &Node, _container: Option<&NodeMap>) -> ValidationResult {
        match value.as_f64() {
            Some(n) if n >= 0.0 => Ok(()),
            Some(_) => Err(ValidationError::constraint("Value is negative", value)),
            None => Err(ValidationError::type_mismatch(
                format!("Sign check requires a number, found {}", value.type_name()),
                value,
            )),
        }
    }

    fn describe(&self) -> String {
        "Must be non-negative".to_string()
    }
}

/// Value must be a string.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringValidator;

impl Validator for StringValidator {
    fn validate(&self, value: &Node, _container: Option<&NodeMap>) -> ValidationResult {
        match value {
            Node::String(_) => Ok(()),
            _ => Err(ValidationError::type_mismatch("Value is not a string", value)),
        }
    }

    fn describe(&self) -> String {
        "Must be a string".to_string()
    }

    fn type_label(&self) -> Option<String> {
        Some("String".to_string())
    }
}

/// Value must be a string shaped like an email address.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailValidator;

impl Validator for EmailValidator {
    fn validate(&self, value: &Node, container: Option<&NodeMap>) -> ValidationResult {
        StringValidator.validate(value, container)?;
        match value.as_str() {
            Some(s) if EMAIL_PATTERN.is_match(s) => Ok(()),
            _ => Err(ValidationError::pattern("String is not a valid email", value)),
        }
    }

    fn describe(&self) -> String {
        "Must be a valid email".to_string()
    }

    fn type_label(&self) -> Option<String> {
        StringValidator.type_label()
    }
}

/// Value must be a `YYYY/MM/DD` string naming a real calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateValidator;

impl DateValidator {
    fn parse(text: &str) -> Option<Option<NaiveDate>> {
        let caps = DATE_PATTERN.captures(text)?;
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let day = caps[3].parse().ok()?;
        Some(NaiveDate::from_ymd_opt(year, month, day))
    }
}

impl Validator for DateValidator {
    fn validate(&self, value: &Node, _container: Option<&NodeMap>) -> ValidationResult {
        match value.as_str().and_then(Self::parse) {
            Some(Some(_)) => Ok(()),
            Some(None) => Err(ValidationError::pattern(
                "Date must be valid and formatted as YYYY/MM/DD",
                value,
            )),
            None => Err(ValidationError::pattern(
                "Date must be formatted as YYYY/MM/DD",
                value,
            )),
        }
    }

    fn describe(&self) -> String {
        "Must be a valid date, formatted as YYYY/MM/DD".to_string()
    }

    fn type_label(&self) -> Option<String> {
        Some("String (date)".to_string())
    }
}

/// Value must be null.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullValidator;

impl Validator for NullValidator {
    fn validate(&self, value: &Node, _container: Option<&NodeMap>) -> ValidationResult {
        if value.is_null() {
            Ok(())
        } else {
            Err(ValidationError::type_mismatch("Value must be null", value))
        }
    }

    fn describe(&self) -> String {
        "Must be null".to_string()
    }

    fn type_label(&self) -> Option<String> {
        Some("null".to_string())
    }
}

/// Value must equal one of a fixed set of literals.
#[derive(Debug, Clone)]
pub struct ValuesValidator {
    allowed: Vec<Node>,
}

impl ValuesValidator {
    /// Creates a membership check over `allowed`.
    pub fn new(allowed: impl IntoIterator<Item = impl Into<Node>>) -> Self {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }
}

impl Validator for ValuesValidator {
    fn validate(&self, value: &Node, _container: Option<&NodeMap>) -> ValidationResult {
        if self.allowed.iter().any(|a| a.loosely_equals(value)) {
            Ok(())
        } else {
            Err(ValidationError::constraint(self.describe(), value))
        }
    }

    fn describe(&self) -> String {
        let listed: Vec<String> = self.allowed.iter().map(literal).collect();
        let lead = if self.allowed.len() >= 2 {
            "Must be one of: "
        } else {
            "Must be: "
        };
        format!("{}{}", lead, listed.join(", "))
    }
}

/// Numeric value must lie within `[min, max]`.
#[derive(Debug, Clone, Copy)]
pub struct RangeValidator {
    min: f64,
    max: f64,
}

impl RangeValidator {
    /// Creates an inclusive range check.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl Validator for RangeValidator {
    fn validate(&self, value: &Node, _container: Option<&NodeMap>) -> ValidationResult {
        match value.as_f64() {
            Some(n) if n >= self.min && n <= self.max => Ok(()),
            Some(_) => Err(ValidationError::constraint(self.describe(), value)),
            None => Err(ValidationError::type_mismatch(
                format!("Range check requires a number, found {}", value.type_name()),
                value,
            )),
        }
    }

    fn describe(&self) -> String {
        format!("Must be between {} and {}", self.min, self.max)
    }
}

/// Length of a string, array or object must lie within bounds.
///
/// Strings are measured in characters. A missing upper bound means unbounded.
#[derive(Debug, Clone, Copy)]
pub struct LengthValidator {
    min: usize,
    max: Option<usize>,
}

impl LengthValidator {
    /// Creates a length check.
    pub fn new(min: usize, max: Option<usize>) -> Self {
        Self { min, max }
    }

    /// Creates a length check with only a lower bound.
    pub fn at_least(min: usize) -> Self {
        Self::new(min, None)
    }

    /// Creates a length check accepting exactly `len` items.
    pub fn exactly(len: usize) -> Self {
        Self::new(len, Some(len))
    }
}

impl Validator for LengthValidator {
    fn validate(&self, value: &Node, _container: Option<&NodeMap>) -> ValidationResult {
        let len = match value {
            Node::String(s) => s.chars().count(),
            Node::List(items) => items.len(),
            Node::Map(map) => map.len(),
            _ => {
                return Err(ValidationError::type_mismatch(
                    format!("Length check not applicable to type {}", value.type_name()),
                    value,
                ));
            }
        };

        let within = len >= self.min && self.max.is_none_or(|max| len <= max);
        if within {
            Ok(())
        } else {
            Err(ValidationError::constraint(self.describe(), value))
        }
    }

    fn describe(&self) -> String {
        match self.max {
            Some(max) => format!("Length must be between {} and {}", self.min, max),
            None => format!("Length must be greater or equal than {}", self.min),
        }
    }
}

/// No data may be supplied; used for operations that take no body.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyValidator;

impl Validator for EmptyValidator {
    fn validate(&self, value: &Node, _container: Option<&NodeMap>) -> ValidationResult {
        if value.is_null() {
            Ok(())
        } else {
            Err(ValidationError::not_empty("Request must be empty", value))
        }
    }

    fn describe(&self) -> String {
        "No additional data must be supplied".to_string()
    }
}

/// Renders a literal for documentation; strings are shown bare.
fn literal(node: &Node) -> String {
    match node {
        Node::String(s) => s.clone(),
        other => other.to_fragment(),
    }
}

/// Shared boolean check.
pub fn boolean() -> Arc<dyn Validator> {
    Arc::new(BooleanValidator)
}

/// Shared integer check.
pub fn integer() -> Arc<dyn Validator> {
    Arc::new(IntegerValidator)
}

/// Shared float check.
pub fn float() -> Arc<dyn Validator> {
    Arc::new(FloatValidator)
}

/// Shared non-negative check.
pub fn non_negative() -> Arc<dyn Validator> {
    Arc::new(NonNegativeValidator)
}

/// Shared string check.
pub fn string() -> Arc<dyn Validator> {
    Arc::new(StringValidator)
}

/// Shared email check.
pub fn email() -> Arc<dyn Validator> {
    Arc::new(EmailValidator)
}

/// Shared date check.
pub fn date() -> Arc<dyn Validator> {
    Arc::new(DateValidator)
}

/// Shared null check.
pub fn null() -> Arc<dyn Validator> {
    Arc::new(NullValidator)
}

/// Shared membership check.
pub fn values(allowed: impl IntoIterator<Item = impl Into<Node>>) -> Arc<dyn Validator> {
    Arc::new(ValuesValidator::new(allowed))
}

/// Shared inclusive range check.
pub fn range(min: f64, max: f64) -> Arc<dyn Validator> {
    Arc::new(RangeValidator::new(min, max))
}

/// Shared length check.
pub fn length(min: usize, max: Option<usize>) -> Arc<dyn Validator> {
    Arc::new(LengthValidator::new(min, max))
}

/// Shared "no body" check.
pub fn empty() -> Arc<dyn Validator> {
    Arc::new(EmptyValidator)
}
