//! # Document Schema Validator
//!
//! Validators and schemas for JSON-shaped documents. This crate provides:
//!
//! - Primitive validators (types, ranges, lengths, allowed values)
//! - Relational validators comparing a value with its sibling fields
//! - `Or`, `All` and `Array` combinators
//! - Object schemas with required/optional fields and builders
//! - The registry of schemas guarding the route optimisation API
//! - A documentation generator driven by the validators themselves
//!
//! ## Example
//!
//! ```rust
//! use docschema_core::{Node, Requirement, Validator};
//! use docschema_validator::{FieldSpec, ObjectSchema, primitives::{float, string}};
//! use serde_json::json;
//!
//! let node = ObjectSchema::new(
//!     "Node",
//!     None,
//!     vec![
//!         FieldSpec::new("node_id", Requirement::Required, "Identifier", vec![string()]),
//!         FieldSpec::new("lat", Requirement::Optional, "Latitude", vec![float()]),
//!     ],
//! )
//! .unwrap();
//!
//! assert!(node.validate(&Node::from(json!({"node_id": "a", "lat": 43.7})), None).is_ok());
//!
//! let err = node.validate(&Node::from(json!({"lat": 43.7})), None).unwrap_err();
//! assert_eq!(err.to_string(), r#"Required key "node_id" not present, {"lat":43.7}"#);
//! ```

pub mod combinators;
pub mod docs;
pub mod primitives;
pub mod relational;

mod builder;
mod engine;
mod object;
mod operation;
mod registry;
mod status;

pub use builder::*;
pub use engine::*;
pub use object::*;
pub use operation::*;
pub use registry::*;
pub use status::*;
