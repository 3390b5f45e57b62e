use anyhow::{Result, anyhow};
use docschema_validator::{docs, registry};
use tracing::info;

use crate::commands::resolve_target;

pub fn execute(target: &str, response: bool, format: &str) -> Result<()> {
    let target = resolve_target(target, response)?;
    info!("Describing schema {}", target.schema);

    let schema = registry().get(target.schema)?;

    let rendered = match format {
        "text" => docs::render_text(schema),
        "markdown" | "md" => docs::render_markdown(schema),
        "json" => serde_json::to_string_pretty(&docs::render_json(schema))?,
        other => return Err(anyhow!("Unsupported output format: {}", other)),
    };

    if let Some(operation) = target.operation {
        match format {
            "markdown" | "md" => println!("## {}\n\n{}\n", operation.name(), operation.description()),
            "text" => println!("{}: {}\n", operation.name(), operation.description()),
            _ => {}
        }
    }
    println!("{}", rendered);

    Ok(())
}
