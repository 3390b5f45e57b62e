//! Combinators built from other validators.
//!
//! - `Or`: ordered alternation, the first accepting branch wins
//! - `All`: conjunction, every validator must accept
//! - `Array`: homogeneous sequence, every element passes every validator

use crate::docs::pluralize_label;
use docschema_core::{Node, NodeMap, ValidationError, ValidationResult, Validator};
use std::sync::Arc;

/// Ordered alternation.
///
/// Branches are tried in order against the same value and container; the
/// first success ends the evaluation. When every branch fails the error
/// message joins the branch descriptions with "or".
#[derive(Debug, Clone)]
pub struct OrValidator {
    branches: Vec<Arc<dyn Validator>>,
}

impl OrValidator {
    /// Creates an alternation over `branches`.
    pub fn new(branches: Vec<Arc<dyn Validator>>) -> Self {
        Self { branches }
    }
}

impl Validator for OrValidator {
    fn validate(&self, value: &Node, container: Option<&NodeMap>) -> ValidationResult {
        let accepted = self
            .branches
            .iter()
            .any(|branch| branch.validate(value, container).is_ok());

        if accepted {
            Ok(())
        } else {
            Err(ValidationError::no_alternative(self.describe(), value))
        }
    }

    fn describe(&self) -> String {
        let joined = self
            .branches
            .iter()
            .map(|b| lowercase_first(&b.describe()))
            .collect::<Vec<_>>()
            .join(" or ");
        uppercase_first(&joined)
    }

    fn type_label(&self) -> Option<String> {
        let labels = self
            .branches
            .iter()
            .map(|b| b.type_label())
            .collect::<Option<Vec<_>>>()?;
        if labels.is_empty() {
            return None;
        }
        Some(labels.join(" or "))
    }

    fn plural_type_label(&self) -> Option<String> {
        let labels = self
            .branches
            .iter()
            .map(|b| plural_label_of(b.as_ref()))
            .collect::<Option<Vec<_>>>()?;
        if labels.is_empty() {
            return None;
        }
        Some(labels.join(" or "))
    }

    fn children(&self) -> Vec<&dyn Validator> {
        self.branches.iter().map(|b| b.as_ref()).collect()
    }
}

/// Conjunction: every validator runs in order against the same value.
///
/// Its type is the type of the first validator.
#[derive(Debug, Clone)]
pub struct AllValidator {
    validators: Vec<Arc<dyn Validator>>,
}

impl AllValidator {
    /// Creates a conjunction over `validators`.
    pub fn new(validators: Vec<Arc<dyn Validator>>) -> Self {
        Self { validators }
    }
}

impl Validator for AllValidator {
    fn validate(&self, value: &Node, container: Option<&NodeMap>) -> ValidationResult {
        self.validators
            .iter()
            .try_for_each(|v| v.validate(value, container))
    }

    fn describe(&self) -> String {
        self.validators
            .iter()
            .map(|v| v.describe())
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn type_label(&self) -> Option<String> {
        self.validators.first()?.type_label()
    }

    fn plural_type_label(&self) -> Option<String> {
        plural_label_of(self.validators.first()?.as_ref())
    }

    fn children(&self) -> Vec<&dyn Validator> {
        self.validators.iter().map(|v| v.as_ref()).collect()
    }

    fn collect(&self, value: &Node, container: Option<&NodeMap>, errors: &mut Vec<ValidationError>) {
        for v in &self.validators {
            v.collect(value, container, errors);
        }
    }
}

/// Homogeneous array.
///
/// Null stands for an absent array and passes without element checks.
/// Elements are visited in index order and, for each element, validators in
/// declaration order. Elements are not read from a map, so they are checked
/// without a container.
#[derive(Debug, Clone)]
pub struct ArrayValidator {
    validators: Vec<Arc<dyn Validator>>,
}

impl ArrayValidator {
    /// Creates an array check applying `validators` to every element.
    pub fn new(validators: Vec<Arc<dyn Validator>>) -> Self {
        Self { validators }
    }

    fn elements<'a>(&self, value: &'a Node) -> ValidationResult<&'a [Node]> {
        match value {
            Node::Null => Ok(&[]),
            Node::List(items) => Ok(items),
            _ => Err(ValidationError::type_mismatch("Value is not an array", value)),
        }
    }
}

impl Validator for ArrayValidator {
    fn validate(&self, value: &Node, _container: Option<&NodeMap>) -> ValidationResult {
        for element in self.elements(value)? {
            for v in &self.validators {
                v.validate(element, None)?;
            }
        }
        Ok(())
    }

    fn describe(&self) -> String {
        let inner = self
            .validators
            .iter()
            .map(|v| v.describe())
            .collect::<Vec<_>>()
            .join("; ");
        format!("Must be an array whose elements satisfy: {}", inner)
    }

    fn type_label(&self) -> Option<String> {
        let head = plural_label_of(self.validators.first()?.as_ref())?;
        Some(format!("Array of {}", head))
    }

    fn plural_type_label(&self) -> Option<String> {
        let head = plural_label_of(self.validators.first()?.as_ref())?;
        Some(format!("Arrays of {}", head))
    }

    fn children(&self) -> Vec<&dyn Validator> {
        self.validators.iter().map(|v| v.as_ref()).collect()
    }

    fn collect(&self, value: &Node, _container: Option<&NodeMap>, errors: &mut Vec<ValidationError>) {
        let elements = match self.elements(value) {
            Ok(elements) => elements,
            Err(err) => {
                errors.push(err);
                return;
            }
        };
        for element in elements {
            for v in &self.validators {
                v.collect(element, None, errors);
            }
        }
    }
}

fn plural_label_of(validator: &dyn Validator) -> Option<String> {
    validator
        .plural_type_label()
        .or_else(|| validator.type_label().map(|label| pluralize_label(&label)))
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Shared alternation.
pub fn or(branches: Vec<Arc<dyn Validator>>) -> Arc<dyn Validator> {
    Arc::new(OrValidator::new(branches))
}

/// Shared conjunction.
pub fn all(validators: Vec<Arc<dyn Validator>>) -> Arc<dyn Validator> {
    Arc::new(AllValidator::new(validators))
}

/// Shared array check.
pub fn array(validators: Vec<Arc<dyn Validator>>) -> Arc<dyn Validator> {
    Arc::new(ArrayValidator::new(validators))
}
