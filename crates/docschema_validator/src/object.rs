//! Object schema validation.
//!
//! An object schema is a closed description of a map: every key must be
//! declared, required keys must be present and each present field runs its
//! validator chain with the whole map as container.

use docschema_core::{
    DocRow, DocTable, Node, NodeMap, Requirement, Result, SchemaError, ValidationError,
    ValidationResult, Validator,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::trace;

/// Declaration of a single field in an object schema.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Field name
    pub name: String,

    /// Whether the field must be present
    pub requirement: Requirement,

    /// Human-readable description
    pub description: String,

    /// Validator chain; the head names the field's type
    pub validators: Vec<Arc<dyn Validator>>,
}

impl FieldSpec {
    /// Creates a new field declaration.
    pub fn new(
        name: impl Into<String>,
        requirement: Requirement,
        description: impl Into<String>,
        validators: Vec<Arc<dyn Validator>>,
    ) -> Self {
        Self {
            name: name.into(),
            requirement,
            description: description.into(),
            validators,
        }
    }

    /// Type label of the head validator.
    pub fn type_label(&self) -> Option<String> {
        self.validators.first()?.type_label()
    }
}

/// Closed-world schema for a map node.
///
/// # Example
///
/// ```rust
/// use docschema_core::{Node, Requirement, Validator};
/// use docschema_validator::{FieldSpec, ObjectSchema, primitives::{float, string}};
/// use serde_json::json;
///
/// let node = ObjectSchema::new(
///     "Node",
///     Some("A point on the map".to_string()),
///     vec![
///         FieldSpec::new("node_id", Requirement::Required, "Identifier", vec![string()]),
///         FieldSpec::new("lat", Requirement::Optional, "Latitude", vec![float()]),
///     ],
/// )
/// .unwrap();
///
/// assert!(node.validate(&Node::from(json!({"node_id": "1"})), None).is_ok());
/// assert!(node.validate(&Node::from(json!({"lat": 1.0})), None).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    name: String,
    description: Option<String>,
    fields: Vec<FieldSpec>,
}

impl ObjectSchema {
    /// Creates a schema, rejecting malformed field declarations.
    ///
    /// # Errors
    ///
    /// Returns a `SchemaError` when a field has no validators, when its head
    /// validator has no type label or when a field name is declared twice.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        fields: Vec<FieldSpec>,
    ) -> Result<Self> {
        let name = name.into();
        let mut seen = HashSet::new();

        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    schema: name.clone(),
                    field: field.name.clone(),
                });
            }
            if field.validators.is_empty() {
                return Err(SchemaError::EmptyValidators {
                    schema: name.clone(),
                    field: field.name.clone(),
                });
            }
            if field.type_label().is_none() {
                return Err(SchemaError::UntypedHead {
                    schema: name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        Ok(Self {
            name,
            description,
            fields,
        })
    }

    /// Derives a schema from `base`, overriding or appending `fields`.
    ///
    /// A field that shares its name with a base field replaces it in place;
    /// other fields are appended after the base fields.
    pub fn extend(
        name: impl Into<String>,
        description: Option<String>,
        base: &ObjectSchema,
        fields: Vec<FieldSpec>,
    ) -> Result<Self> {
        let mut merged = base.fields.clone();
        for field in fields {
            match merged.iter_mut().find(|f| f.name == field.name) {
                Some(slot) => *slot = field,
                None => merged.push(field),
            }
        }
        Self::new(name, description, merged)
    }

    /// Copies this schema with every requirement set to `requirement`.
    ///
    /// The `primary_key` field, when given, keeps its original requirement.
    pub fn relaxed(
        &self,
        name: impl Into<String>,
        requirement: Requirement,
        primary_key: Option<&str>,
    ) -> Self {
        let fields = self
            .fields
            .iter()
            .map(|field| {
                let mut field = field.clone();
                if Some(field.name.as_str()) != primary_key {
                    field.requirement = requirement;
                }
                field
            })
            .collect();

        Self {
            name: name.into(),
            description: self.description.clone(),
            fields,
        }
    }

    /// Schema name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schema description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn as_map<'a>(&self, value: &'a Node) -> ValidationResult<&'a NodeMap> {
        value
            .as_map()
            .ok_or_else(|| ValidationError::type_mismatch("Value is not an object", value))
    }

    /// Keys present in `map` but not declared, in sorted order.
    fn extra_keys<'a>(&self, map: &'a NodeMap) -> Vec<&'a str> {
        map.keys()
            .map(String::as_str)
            .filter(|key| self.field(key).is_none())
            .collect()
    }
}

impl Validator for ObjectSchema {
    fn validate(&self, value: &Node, _container: Option<&NodeMap>) -> ValidationResult {
        let map = self.as_map(value)?;

        let extra = self.extra_keys(map);
        if !extra.is_empty() {
            trace!(schema = %self.name, ?extra, "rejecting undeclared keys");
            return Err(ValidationError::extra_keys(extra));
        }

        for field in &self.fields {
            match map.get(&field.name) {
                Some(element) => {
                    for v in &field.validators {
                        v.validate(element, Some(map))?;
                    }
                }
                None if field.requirement.is_required() => {
                    trace!(schema = %self.name, field = %field.name, "required field missing");
                    return Err(ValidationError::missing_field(&field.name, value));
                }
                None => {}
            }
        }

        Ok(())
    }

    fn describe(&self) -> String {
        let mut s = String::from("Must be an object with fields:\n");
        for field in &self.fields {
            s.push_str(&format!(
                "{}: ({}) {}\n",
                field.name, field.requirement, field.description
            ));
            for v in &field.validators {
                for line in v.describe().lines() {
                    s.push_str("  ");
                    s.push_str(line);
                    s.push('\n');
                }
            }
        }
        s
    }

    fn type_label(&self) -> Option<String> {
        Some(format!("Object ({})", self.name))
    }

    fn doc_table(&self) -> Option<DocTable> {
        let rows = self
            .fields
            .iter()
            .map(|field| DocRow {
                name: field.name.clone(),
                description: field.description.clone(),
                type_label: field.type_label().unwrap_or_default(),
                requirement: field.requirement,
                requirements: field
                    .validators
                    .iter()
                    .skip(1)
                    .map(|v| v.describe())
                    .collect(),
            })
            .collect();

        Some(DocTable {
            title: self.name.clone(),
            description: self.description.clone(),
            rows,
        })
    }

    fn children(&self) -> Vec<&dyn Validator> {
        self.fields
            .iter()
            .flat_map(|field| field.validators.iter().map(|v| v.as_ref()))
            .collect()
    }

    fn collect(&self, value: &Node, _container: Option<&NodeMap>, errors: &mut Vec<ValidationError>) {
        let map = match self.as_map(value) {
            Ok(map) => map,
            Err(err) => {
                errors.push(err);
                return;
            }
        };

        let extra = self.extra_keys(map);
        if !extra.is_empty() {
            errors.push(ValidationError::extra_keys(extra));
        }

        for field in &self.fields {
            match map.get(&field.name) {
                Some(element) => {
                    for v in &field.validators {
                        v.collect(element, Some(map), errors);
                    }
                }
                None if field.requirement.is_required() => {
                    errors.push(ValidationError::missing_field(&field.name, value));
                }
                None => {}
            }
        }
    }
}
