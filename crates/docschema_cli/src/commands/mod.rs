pub mod describe;
pub mod list;
pub mod validate;

use anyhow::{Result, anyhow};
use docschema_validator::{Operation, registry};

/// A schema selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    /// Registry name of the schema
    pub schema: &'static str,
    /// Operation the schema guards, when selected through one
    pub operation: Option<Operation>,
}

/// Resolves an operation name or a registry schema name.
///
/// Operation names pick the request schema unless `response` is set.
/// A schema name already fixes the body, so `response` is rejected there.
pub fn resolve_target(name: &str, response: bool) -> Result<Target> {
    if let Ok(operation) = name.parse::<Operation>() {
        let schema = if response {
            operation.response_schema()
        } else {
            operation.request_schema()
        };
        return Ok(Target {
            schema,
            operation: Some(operation),
        });
    }

    let schema = registry().names().find(|known| *known == name).ok_or_else(|| {
        let operations: Vec<_> = Operation::ALL.iter().map(|op| op.name()).collect();
        let schemas: Vec<_> = registry().names().collect();
        anyhow!(
            "Unknown schema or operation: {}\n  operations: {}\n  schemas: {}",
            name,
            operations.join(", "),
            schemas.join(", ")
        )
    })?;

    if response {
        return Err(anyhow!(
            "--response applies to operations only; {} is a schema name",
            name
        ));
    }

    Ok(Target {
        schema,
        operation: None,
    })
}
