use anyhow::{Context, Result};
use docschema_core::ValidationContext;
use docschema_validator::{DocumentValidator, ErrorStatus};
use std::path::Path;
use tracing::info;

use crate::commands::resolve_target;
use crate::document::load_document;
use crate::output;

pub fn execute(
    target: &str,
    document_path: &str,
    response: bool,
    accumulate: bool,
    format: &str,
) -> Result<()> {
    let target = resolve_target(target, response)?;
    info!("Validating {} against schema {}", document_path, target.schema);

    let document = load_document(Path::new(document_path))?;

    let context = ValidationContext::new()
        .with_accumulate(accumulate)
        .with_metadata("document", document_path);

    let report = DocumentValidator::new()
        .validate_document(target.schema, &document, &context)
        .with_context(|| format!("Failed to validate document: {}", document_path))?;

    let status = match report.first_error() {
        Some(err) => ErrorStatus::from_validation_error(err, target.operation),
        None => ErrorStatus::success(),
    };

    output::print_validation_report(&report, &status, format)?;

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}
