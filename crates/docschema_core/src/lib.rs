//! # Document Schema Core
//!
//! Core data structures and types for the Document Schema Engine.
//!
//! This crate provides the building blocks shared by every validator: the
//! JSON-shaped document model, the validation error type, the `Validator`
//! capability and the documentation model used to describe schemas.
//!
//! ## Key Concepts
//!
//! - **Node**: an already-parsed document (map, sequence or scalar)
//! - **Validator**: accepts or rejects a node, optionally looking at the map it came from
//! - **ValidationError**: the first violation found, with the offending fragment
//! - **DocTable**: tabular documentation rendered from an object schema
//!
//! ## Example
//!
//! ```rust
//! use docschema_core::{Node, ValidationError, ViolationKind};
//! use serde_json::json;
//!
//! let node = Node::from(json!({"node_id": "42", "lat": 43.77}));
//! assert_eq!(node.get("lat").and_then(Node::as_f64), Some(43.77));
//!
//! let err = ValidationError::missing_field("lon", &node);
//! assert_eq!(err.kind, ViolationKind::MissingField);
//! ```

pub mod document;
pub mod error;
pub mod schema;
pub mod validator;

pub use document::*;
pub use error::*;
pub use schema::*;
pub use validator::*;
