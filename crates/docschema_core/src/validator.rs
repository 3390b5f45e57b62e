//! Validation traits and types for document schemas.
//!
//! This module defines the `Validator` capability shared by every primitive,
//! combinator and object schema, together with the context and report types
//! used by the validation engine.

use crate::{DocTable, Node, NodeMap, ValidationError};
use std::collections::HashMap;
use std::fmt;

/// Result type for validation operations.
pub type ValidationResult<T = ()> = std::result::Result<T, ValidationError>;

/// Core trait for validating document nodes.
///
/// A validator checks a `value` drawn from an optional `container`, the map
/// the value was read from. Relational validators read sibling fields from
/// the container; everything else ignores it. Implementations must be pure:
/// they never mutate the value, the container or themselves, so a single
/// instance can be shared across threads and concurrent validations.
///
/// # Example
///
/// ```rust
/// use docschema_core::{Node, NodeMap, ValidationError, ValidationResult, Validator};
///
/// #[derive(Debug)]
/// struct Positive;
///
/// impl Validator for Positive {
///     fn validate(&self, value: &Node, _container: Option<&NodeMap>) -> ValidationResult {
///         match value.as_f64() {
///             Some(n) if n > 0.0 => Ok(()),
///             _ => Err(ValidationError::constraint(self.describe(), value)),
///         }
///     }
///
///     fn describe(&self) -> String {
///         "Must be positive".to_string()
///     }
/// }
///
/// assert!(Positive.validate(&Node::Int(3), None).is_ok());
/// assert!(Positive.validate(&Node::Int(-3), None).is_err());
/// ```
pub trait Validator: Send + Sync + fmt::Debug {
    /// Validates `value`, stopping at the first violation.
    fn validate(&self, value: &Node, container: Option<&NodeMap>) -> ValidationResult;

    /// Human-readable description of what this validator enforces.
    fn describe(&self) -> String;

    /// Type name used when a field or combinator documents its type.
    ///
    /// Predicates that do not pin down a type (ranges, lengths, relations)
    /// return `None` and cannot head a field's validator chain.
    fn type_label(&self) -> Option<String> {
        None
    }

    /// Plural of `type_label`, used when an array documents its elements.
    ///
    /// `None` leaves the caller to derive it from the singular label.
    /// Combinators override this so alternation and nesting pluralize per
    /// branch rather than on the flattened text.
    fn plural_type_label(&self) -> Option<String> {
        None
    }

    /// Tabular documentation, provided by object schemas only.
    fn doc_table(&self) -> Option<DocTable> {
        None
    }

    /// Validators nested inside this one, in declaration order.
    fn children(&self) -> Vec<&dyn Validator> {
        Vec::new()
    }

    /// Validates `value`, pushing every violation found into `errors`.
    ///
    /// The default runs `validate` and records its failure. Structural
    /// validators override this to keep descending after a failure.
    fn collect(&self, value: &Node, container: Option<&NodeMap>, errors: &mut Vec<ValidationError>) {
        if let Err(err) = self.validate(value, container) {
            errors.push(err);
        }
    }
}

/// How the engine reacts to violations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Abort at the first violation
    #[default]
    FailFast,
    /// Keep walking and report every violation found
    Accumulate,
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMode::FailFast => f.write_str("fail-fast"),
            ValidationMode::Accumulate => f.write_str("accumulate"),
        }
    }
}

/// Context for validation operations.
#[derive(Debug, Default, Clone)]
pub struct ValidationContext {
    /// Violation handling mode
    pub mode: ValidationMode,

    /// Additional metadata for the validation
    pub metadata: HashMap<String, String>,
}

impl ValidationContext {
    /// Creates a new validation context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches between fail-fast and accumulating validation.
    pub fn with_accumulate(mut self, accumulate: bool) -> Self {
        self.mode = if accumulate {
            ValidationMode::Accumulate
        } else {
            ValidationMode::FailFast
        };
        self
    }

    /// Adds metadata to the context.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Report of a document validation run.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Whether the document was accepted
    pub passed: bool,

    /// Name of the schema the document was checked against
    pub schema: String,

    /// Mode the run used
    pub mode: ValidationMode,

    /// Violations found; at most one in fail-fast mode
    pub errors: Vec<ValidationError>,

    /// Validation statistics
    pub stats: ValidationStats,

    /// Metadata carried over from the validation context
    pub metadata: HashMap<String, String>,
}

/// Statistics about validation execution.
#[derive(Debug, Clone, Default)]
pub struct ValidationStats {
    /// Number of violations reported
    pub errors: usize,

    /// Validation duration in milliseconds
    pub duration_ms: u64,
}

impl ValidationReport {
    /// Creates a new successful validation report.
    pub fn success(schema: impl Into<String>, mode: ValidationMode) -> Self {
        Self {
            passed: true,
            schema: schema.into(),
            mode,
            errors: Vec::new(),
            stats: ValidationStats::default(),
            metadata: HashMap::new(),
        }
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.stats.errors = self.errors.len();
        self.passed = false;
    }

    /// First violation found, if any.
    pub fn first_error(&self) -> Option<&ValidationError> {
        self.errors.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct AlwaysFails;

    impl Validator for AlwaysFails {
        fn validate(&self, value: &Node, _container: Option<&NodeMap>) -> ValidationResult {
            Err(ValidationError::constraint("never", value))
        }

        fn describe(&self) -> String {
            "Never passes".to_string()
        }
    }

    #[test]
    fn test_default_collect_records_failure() {
        let mut errors = Vec::new();
        AlwaysFails.collect(&Node::Null, None, &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "never");
    }

    #[test]
    fn test_defaults_for_leaf_validators() {
        assert_eq!(AlwaysFails.type_label(), None);
        assert_eq!(AlwaysFails.plural_type_label(), None);
        assert!(AlwaysFails.doc_table().is_none());
        assert!(AlwaysFails.children().is_empty());
    }

    #[test]
    fn test_context_builder() {
        let context = ValidationContext::new()
            .with_accumulate(true)
            .with_metadata("operation", "shortest_path");
        assert_eq!(context.mode, ValidationMode::Accumulate);
        assert_eq!(context.metadata.get("operation").unwrap(), "shortest_path");
        assert_eq!(ValidationContext::new().mode, ValidationMode::FailFast);
    }

    #[test]
    fn test_report_add_error() {
        let mut report = ValidationReport::success("node", ValidationMode::FailFast);
        assert!(report.passed);
        assert!(report.first_error().is_none());
        assert!(report.metadata.is_empty());

        report.add_error(ValidationError::constraint("bad", &Node::Int(1)));
        assert!(!report.passed);
        assert_eq!(report.stats.errors, 1);
        assert_eq!(report.first_error().unwrap().message, "bad");
    }
}
