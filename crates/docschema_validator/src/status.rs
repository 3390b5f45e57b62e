//! Error-status body returned by the API layer.

use crate::Operation;
use docschema_core::{Node, ValidationError};
use serde::{Deserialize, Serialize};

/// The call completed.
pub const SUCCESS_CODE: &str = "0";
/// The request was rejected or processing failed.
pub const FAILURE_CODE: &str = "-1";
/// No path connects the requested nodes.
pub const NO_PATH_CODE: &str = "-2";

/// Outcome of an optimisation call, as carried in `response.response`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_operation: Option<String>,

    pub error_code: String,

    pub error_message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_info: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
}

impl ErrorStatus {
    /// Status of a successful call.
    pub fn success() -> Self {
        Self {
            current_operation: None,
            error_code: SUCCESS_CODE.to_string(),
            error_message: "successful".to_string(),
            more_info: None,
            project_name: None,
        }
    }

    /// Body reporting a rejected document.
    pub fn from_validation_error(error: &ValidationError, operation: Option<Operation>) -> Self {
        Self {
            current_operation: operation.map(|op| op.current_operation().to_string()),
            error_code: FAILURE_CODE.to_string(),
            error_message: error.to_string(),
            more_info: None,
            project_name: None,
        }
    }

    /// Body reporting that the nodes are not connected.
    pub fn no_path(operation: Operation) -> Self {
        Self {
            current_operation: Some(operation.current_operation().to_string()),
            error_code: NO_PATH_CODE.to_string(),
            error_message: "no path found".to_string(),
            more_info: None,
            project_name: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error_code == SUCCESS_CODE
    }

    /// Converts the body into a document node.
    pub fn to_node(&self) -> Node {
        serde_json::to_value(self)
            .map(Node::from)
            .unwrap_or(Node::Null)
    }
}
