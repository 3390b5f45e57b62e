//! Main validation engine.
//!
//! This module provides the `DocumentValidator` that resolves a schema by
//! registry name or API operation, runs it in the mode chosen by the
//! `ValidationContext` and produces a `ValidationReport`.

use crate::{Operation, SchemaRegistry, registry};
use docschema_core::{
    Node, Result, ValidationContext, ValidationMode, ValidationReport, ValidationStats, Validator,
};
use std::time::Instant;
use tracing::debug;

/// Validation engine for documents.
///
/// # Example
///
/// ```rust
/// use docschema_core::{Node, ValidationContext};
/// use docschema_validator::{DocumentValidator, Operation};
/// use serde_json::json;
///
/// let validator = DocumentValidator::new();
/// let request = Node::from(json!({
///     "journey": {
///         "search_route_type": "fastest",
///         "source_node": {"lat": 43.77, "lon": 11.25},
///         "destination_node": {"lat": 43.78, "lon": 11.26}
///     }
/// }));
///
/// let report = validator
///     .validate_request(Operation::ShortestPath, &request, &ValidationContext::new())
///     .unwrap();
/// assert!(report.passed);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DocumentValidator<'r> {
    registry: &'r SchemaRegistry,
}

impl DocumentValidator<'static> {
    /// Creates a validator over the shared registry.
    pub fn new() -> Self {
        Self {
            registry: registry(),
        }
    }
}

impl Default for DocumentValidator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> DocumentValidator<'r> {
    /// Creates a validator over a specific registry.
    pub fn with_registry(registry: &'r SchemaRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r SchemaRegistry {
        self.registry
    }

    /// Validates `document` against the schema registered as `schema`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnknownSchema` if no schema has that name. A
    /// rejected document is not an error: it yields a failed report.
    pub fn validate_document(
        &self,
        schema: &str,
        document: &Node,
        context: &ValidationContext,
    ) -> Result<ValidationReport> {
        let validator = self.registry.get(schema)?;
        Ok(self.validate_with(schema, validator, document, context))
    }

    /// Validates a request body for `operation`.
    pub fn validate_request(
        &self,
        operation: Operation,
        document: &Node,
        context: &ValidationContext,
    ) -> Result<ValidationReport> {
        self.validate_document(operation.request_schema(), document, context)
    }

    /// Validates a response body for `operation`.
    pub fn validate_response(
        &self,
        operation: Operation,
        document: &Node,
        context: &ValidationContext,
    ) -> Result<ValidationReport> {
        self.validate_document(operation.response_schema(), document, context)
    }

    /// Validates `document` against an arbitrary validator.
    ///
    /// The document is the root, so it is checked without a container.
    pub fn validate_with(
        &self,
        name: &str,
        validator: &dyn Validator,
        document: &Node,
        context: &ValidationContext,
    ) -> ValidationReport {
        let start = Instant::now();
        let mut report = ValidationReport::success(name, context.mode);
        report.metadata = context.metadata.clone();

        match context.mode {
            ValidationMode::FailFast => {
                if let Err(err) = validator.validate(document, None) {
                    report.add_error(err);
                }
            }
            ValidationMode::Accumulate => {
                let mut errors = Vec::new();
                validator.collect(document, None, &mut errors);
                for err in errors {
                    report.add_error(err);
                }
            }
        }

        report.stats = ValidationStats {
            errors: report.errors.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        debug!(
            schema = name,
            mode = %context.mode,
            passed = report.passed,
            errors = report.stats.errors,
            duration_ms = report.stats.duration_ms,
            metadata = ?context.metadata,
            "document validated"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docschema_core::{SchemaError, ViolationKind};
    use serde_json::json;

    fn request() -> Node {
        Node::from(json!({
            "message_version": "1.0",
            "journey": {
                "search_route_type": "fastest",
                "search_max_feet_km": 1.5,
                "source_node": {"node_id": "a", "lat": 43.77, "lon": 11.25},
                "destination_node": {"node_id": "b", "lat": 43.78, "lon": 11.26}
            }
        }))
    }

    #[test]
    fn test_valid_request() {
        let report = DocumentValidator::new()
            .validate_request(Operation::ShortestPath, &request(), &ValidationContext::new())
            .unwrap();
        assert!(report.passed, "unexpected errors: {:?}", report.errors);
        assert_eq!(report.schema, "request");
        assert_eq!(report.mode, ValidationMode::FailFast);
        assert_eq!(report.stats.errors, 0);
    }

    #[test]
    fn test_fail_fast_reports_one_error() {
        let doc = Node::from(json!({
            "journey": {
                "search_max_feet_km": -1.0,
                "source_node": {"lat": 143.0},
                "destination_node": {}
            }
        }));
        let report = DocumentValidator::new()
            .validate_document("request", &doc, &ValidationContext::new())
            .unwrap();
        assert!(!report.passed);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.first_error().unwrap().kind, ViolationKind::MissingField);
    }

    #[test]
    fn test_accumulate_reports_every_error() {
        let doc = Node::from(json!({
            "journey": {
                "search_max_feet_km": -1.0,
                "source_node": {"lat": 143.0},
                "destination_node": {}
            }
        }));
        let context = ValidationContext::new().with_accumulate(true);
        let report = DocumentValidator::new()
            .validate_document("request", &doc, &context)
            .unwrap();
        assert!(!report.passed);
        assert_eq!(report.mode, ValidationMode::Accumulate);
        assert_eq!(report.errors.len(), 3);
        assert_eq!(report.stats.errors, 3);
    }

    #[test]
    fn test_context_metadata_reaches_report() {
        let context = ValidationContext::new().with_metadata("document", "journey.json");
        let report = DocumentValidator::new()
            .validate_request(Operation::ShortestPath, &request(), &context)
            .unwrap();
        assert_eq!(report.metadata.len(), 1);
        assert_eq!(report.metadata["document"], "journey.json");
    }

    #[test]
    fn test_unknown_schema() {
        let err = DocumentValidator::new()
            .validate_document("missing", &Node::Null, &ValidationContext::new())
            .unwrap_err();
        assert_eq!(err, SchemaError::UnknownSchema("missing".into()));
    }

    #[test]
    fn test_with_registry() {
        let registry = SchemaRegistry::build().unwrap();
        let validator = DocumentValidator::with_registry(&registry);
        let report = validator
            .validate_document("node", &Node::from(json!({"lon": 11.25})), &ValidationContext::new())
            .unwrap();
        assert!(report.passed);
    }
}
