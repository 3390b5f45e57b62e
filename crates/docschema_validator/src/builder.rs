//! Builder pattern for declaring object schemas.
//!
//! This module provides fluent builders for object schemas and their fields.
//! Declaration mistakes surface as `SchemaError`s from `build()`.

use crate::{FieldSpec, ObjectSchema};
use docschema_core::{Requirement, Result, SchemaError, Validator};
use std::collections::HashSet;
use std::sync::Arc;

/// Builder for creating an `ObjectSchema`.
///
/// # Example
///
/// ```rust
/// use docschema_validator::{FieldBuilder, ObjectSchemaBuilder, primitives::{float, range}};
///
/// let node = ObjectSchemaBuilder::new("Node")
///     .description("Details about a node in the graph")
///     .field(
///         FieldBuilder::new("lat")
///             .optional()
///             .description("Latitude in degrees")
///             .validator(float())
///             .validator(range(-90.0, 90.0)),
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(node.fields().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ObjectSchemaBuilder {
    name: String,
    description: Option<String>,
    inherited: Vec<FieldSpec>,
    fields: Vec<FieldBuilder>,
}

impl ObjectSchemaBuilder {
    /// Creates a new schema builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the schema description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Starts from the fields of `base`.
    ///
    /// Fields declared afterwards with the same name replace the inherited
    /// ones in place.
    pub fn inherit(mut self, base: &ObjectSchema) -> Self {
        self.inherited = base.fields().to_vec();
        self
    }

    /// Adds a field to the schema.
    pub fn field(mut self, field: FieldBuilder) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a required field.
    pub fn required(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        validators: Vec<Arc<dyn Validator>>,
    ) -> Self {
        self.field(
            FieldBuilder::new(name)
                .required()
                .description(description)
                .validators(validators),
        )
    }

    /// Adds an optional field.
    pub fn optional(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        validators: Vec<Arc<dyn Validator>>,
    ) -> Self {
        self.field(
            FieldBuilder::new(name)
                .optional()
                .description(description)
                .validators(validators),
        )
    }

    /// Builds the schema.
    ///
    /// # Errors
    ///
    /// Returns a `SchemaError` if a field lacks a requirement flag or a
    /// description, has no validators, has an untyped head validator, or is
    /// declared twice.
    pub fn build(self) -> Result<ObjectSchema> {
        let mut declared = HashSet::new();
        let mut fields = Vec::with_capacity(self.fields.len());
        for builder in self.fields {
            let field = builder.build(&self.name)?;
            if !declared.insert(field.name.clone()) {
                return Err(SchemaError::DuplicateField {
                    schema: self.name,
                    field: field.name,
                });
            }
            fields.push(field);
        }

        let mut merged = self.inherited;
        for field in fields {
            match merged.iter_mut().find(|f| f.name == field.name) {
                Some(slot) => *slot = field,
                None => merged.push(field),
            }
        }

        ObjectSchema::new(self.name, self.description, merged)
    }
}

/// Builder for creating a `FieldSpec`.
///
/// Requirement and description have no defaults and must be set explicitly.
#[derive(Debug, Default)]
pub struct FieldBuilder {
    name: String,
    requirement: Option<Requirement>,
    description: Option<String>,
    validators: Vec<Arc<dyn Validator>>,
}

impl FieldBuilder {
    /// Creates a new field builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the requirement flag.
    pub fn requirement(mut self, requirement: Requirement) -> Self {
        self.requirement = Some(requirement);
        self
    }

    /// Marks the field as required.
    pub fn required(self) -> Self {
        self.requirement(Requirement::Required)
    }

    /// Marks the field as optional.
    pub fn optional(self) -> Self {
        self.requirement(Requirement::Optional)
    }

    /// Sets the field description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a validator to the chain.
    pub fn validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Appends several validators to the chain.
    pub fn validators(mut self, validators: Vec<Arc<dyn Validator>>) -> Self {
        self.validators.extend(validators);
        self
    }

    fn build(self, schema: &str) -> Result<FieldSpec> {
        let requirement = self
            .requirement
            .ok_or_else(|| SchemaError::MissingRequirement {
                schema: schema.to_string(),
                field: self.name.clone(),
            })?;
        let description = self
            .description
            .ok_or_else(|| SchemaError::MissingDescription {
                schema: schema.to_string(),
                field: self.name.clone(),
            })?;

        Ok(FieldSpec::new(
            self.name,
            requirement,
            description,
            self.validators,
        ))
    }
}
