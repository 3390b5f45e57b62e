//! Loading documents from disk.

use anyhow::{Context, Result, anyhow};
use docschema_core::Node;
use serde_json::Value;
use std::path::Path;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

/// Detects the document format from the file extension.
pub fn detect_format(path: &Path) -> Result<DocumentFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| anyhow!("Document has no file extension: {}", path.display()))?;

    match extension.to_lowercase().as_str() {
        "json" => Ok(DocumentFormat::Json),
        "yaml" | "yml" => Ok(DocumentFormat::Yaml),
        "toml" => Ok(DocumentFormat::Toml),
        other => Err(anyhow!(
            "Unsupported document format: .{} (expected json, yaml, yml or toml)",
            other
        )),
    }
}

/// Parses document text in the given format.
pub fn parse_document(content: &str, format: DocumentFormat) -> Result<Node> {
    let value: Value = match format {
        DocumentFormat::Json => serde_json::from_str(content).context("Invalid JSON")?,
        DocumentFormat::Yaml => serde_yaml_ng::from_str(content).context("Invalid YAML")?,
        DocumentFormat::Toml => toml::from_str(content).context("Invalid TOML")?,
    };
    Ok(Node::from(value))
}

/// Reads and parses a document, detecting its format from the extension.
pub fn load_document(path: &Path) -> Result<Node> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document: {}", path.display()))?;
    parse_document(&content, format)
        .with_context(|| format!("Failed to parse document: {}", path.display()))
}
