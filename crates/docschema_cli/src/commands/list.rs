use anyhow::{Result, anyhow};
use colored::*;
use docschema_core::Validator;
use docschema_validator::{Operation, registry};
use serde_json::json;

pub fn execute(format: &str) -> Result<()> {
    match format {
        "json" => print_json(),
        "text" => {
            print_text();
            Ok(())
        }
        other => Err(anyhow!("Unsupported output format: {}", other)),
    }
}

fn print_text() {
    println!("{}", "Operations:".bold());
    for op in Operation::ALL {
        println!(
            "  {} {} -> {}",
            format!("{:<24}", op.name()).cyan(),
            op.request_schema(),
            op.response_schema()
        );
    }

    println!("\n{}", "Schemas:".bold());
    for (name, schema) in registry().iter() {
        println!(
            "  {} {}",
            format!("{:<28}", name).cyan(),
            schema.type_label().unwrap_or_default()
        );
    }
}

fn print_json() -> Result<()> {
    let operations: Vec<_> = Operation::ALL
        .iter()
        .map(|op| {
            json!({
                "name": op.name(),
                "description": op.description(),
                "request": op.request_schema(),
                "response": op.response_schema(),
            })
        })
        .collect();

    let schemas: Vec<_> = registry()
        .iter()
        .map(|(name, schema)| json!({"name": name, "type": schema.type_label()}))
        .collect();

    let output = json!({"operations": operations, "schemas": schemas});
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
