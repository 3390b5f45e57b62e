//! Error types for document schemas.
//!
//! `ValidationError` is the single failure value produced while checking a
//! document. `SchemaError` covers mistakes made while declaring or looking up
//! schemas, which are programmer errors rather than data errors.

use crate::Node;
use serde::Serialize;
use thiserror::Error;

/// Result type for schema construction and lookup.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Value has the wrong type (not a map, not a string, ...)
    TypeMismatch,
    /// A required key is absent from a map
    MissingField,
    /// A map carries keys the schema does not declare
    ExtraKeys,
    /// Range, length, membership or sign constraint failed
    Constraint,
    /// String does not match the expected pattern or calendar date
    Pattern,
    /// Cross-field rule failed against the container
    Relation,
    /// No branch of an alternation accepted the value
    NoAlternative,
    /// A value was supplied where none is expected
    NotEmpty,
}

/// A document failed validation.
///
/// Carries a human-readable message and a JSON snapshot of the offending
/// fragment. There is no nested error chain; the first failure wins.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{message}, {fragment}")]
pub struct ValidationError {
    /// Failure category
    pub kind: ViolationKind,
    /// Human-readable description of the failure
    pub message: String,
    /// Serialized snapshot of the offending value
    pub fragment: String,
}

impl ValidationError {
    /// Creates a new validation error from a message and the offending node.
    pub fn new(kind: ViolationKind, message: impl Into<String>, offending: &Node) -> Self {
        Self {
            kind,
            message: message.into(),
            fragment: offending.to_fragment(),
        }
    }

    /// Creates a new type mismatch error.
    pub fn type_mismatch(message: impl Into<String>, offending: &Node) -> Self {
        Self::new(ViolationKind::TypeMismatch, message, offending)
    }

    /// Creates a new missing field error naming the absent key.
    pub fn missing_field(field: &str, container: &Node) -> Self {
        Self::new(
            ViolationKind::MissingField,
            format!("Required key \"{}\" not present", field),
            container,
        )
    }

    /// Creates a new extra keys error listing the undeclared keys.
    pub fn extra_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let keys: Vec<Node> = keys.into_iter().map(Node::from).collect();
        Self::new(ViolationKind::ExtraKeys, "Extra keys in object", &Node::List(keys))
    }

    /// Creates a new constraint violation error.
    pub fn constraint(message: impl Into<String>, offending: &Node) -> Self {
        Self::new(ViolationKind::Constraint, message, offending)
    }

    /// Creates a new pattern mismatch error.
    pub fn pattern(message: impl Into<String>, offending: &Node) -> Self {
        Self::new(ViolationKind::Pattern, message, offending)
    }

    /// Creates a new relational rule error.
    pub fn relation(message: impl Into<String>, offending: &Node) -> Self {
        Self::new(ViolationKind::Relation, message, offending)
    }

    /// Creates a new error for an alternation where every branch failed.
    pub fn no_alternative(message: impl Into<String>, offending: &Node) -> Self {
        Self::new(ViolationKind::NoAlternative, message, offending)
    }

    /// Creates a new error for a value supplied where none is expected.
    pub fn not_empty(message: impl Into<String>, offending: &Node) -> Self {
        Self::new(ViolationKind::NotEmpty, message, offending)
    }
}

/// Errors raised while declaring or resolving schemas.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Field declared without a requirement flag
    #[error("Field '{field}' in schema '{schema}' has no requirement flag")]
    MissingRequirement { schema: String, field: String },

    /// Field declared without a description
    #[error("Field '{field}' in schema '{schema}' has no description")]
    MissingDescription { schema: String, field: String },

    /// Field declared with an empty validator chain
    #[error("Field '{field}' in schema '{schema}' has no validators")]
    EmptyValidators { schema: String, field: String },

    /// Head validator of a field cannot name its type
    #[error("Head validator of field '{field}' in schema '{schema}' has no type label")]
    UntypedHead { schema: String, field: String },

    /// Field declared twice in the same schema
    #[error("Duplicate field '{field}' in schema '{schema}'")]
    DuplicateField { schema: String, field: String },

    /// No schema registered under this name
    #[error("Unknown schema: {0}")]
    UnknownSchema(String),

    /// No API operation registered under this name
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_message_and_fragment() {
        let err = ValidationError::type_mismatch("Value is not a string", &Node::Int(42));
        assert_eq!(err.to_string(), "Value is not a string, 42");
        assert_eq!(err.kind, ViolationKind::TypeMismatch);
    }

    #[test]
    fn test_missing_field_names_key() {
        let err = ValidationError::missing_field("journey", &Node::Map(Default::default()));
        assert_eq!(err.kind, ViolationKind::MissingField);
        assert!(err.message.contains("\"journey\""));
        assert_eq!(err.fragment, "{}");
    }

    #[test]
    fn test_extra_keys_fragment_lists_keys() {
        let err = ValidationError::extra_keys(["foo", "bar"]);
        assert_eq!(err.kind, ViolationKind::ExtraKeys);
        assert_eq!(err.fragment, r#"["foo","bar"]"#);
    }

    #[test]
    fn test_schema_error_messages() {
        let err = SchemaError::UntypedHead {
            schema: "Node".into(),
            field: "lat".into(),
        };
        assert_eq!(
            err.to_string(),
            "Head validator of field 'lat' in schema 'Node' has no type label"
        );
        assert_eq!(
            SchemaError::UnknownSchema("nope".into()).to_string(),
            "Unknown schema: nope"
        );
    }
}
