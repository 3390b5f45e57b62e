//! Schema description types.
//!
//! Field requirement flags and the tabular documentation model that object
//! schemas expose for developer-facing docs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a declared field must be present in a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    /// Field must be present
    Required,
    /// Field may be absent
    Optional,
}

impl Requirement {
    /// Returns true for `Requirement::Required`.
    pub fn is_required(self) -> bool {
        matches!(self, Requirement::Required)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Required => f.write_str("required"),
            Requirement::Optional => f.write_str("optional"),
        }
    }
}

/// Tabular documentation of an object schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocTable {
    /// Schema name, also used as the in-page anchor
    pub title: String,

    /// Schema description
    pub description: Option<String>,

    /// One row per declared field, in declaration order
    pub rows: Vec<DocRow>,
}

/// Documentation row for a single field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocRow {
    /// Field name
    pub name: String,

    /// Field description
    pub description: String,

    /// Type label taken from the head validator
    #[serde(rename = "type")]
    pub type_label: String,

    /// Requirement flag
    pub requirement: Requirement,

    /// Descriptions of the validators after the head
    pub requirements: Vec<String>,
}

impl DocTable {
    /// Names of the fields flagged as required.
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter(|row| row.requirement.is_required())
            .map(|row| row.name.as_str())
    }
}
