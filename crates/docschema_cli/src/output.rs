use anyhow::{Result, anyhow};
use colored::*;
use docschema_core::ValidationReport;
use docschema_validator::ErrorStatus;
use serde_json::json;

pub fn print_validation_report(
    report: &ValidationReport,
    status: &ErrorStatus,
    format: &str,
) -> Result<()> {
    match format {
        "json" => print_json_report(report, status),
        "text" => {
            print_text_report(report);
            Ok(())
        }
        other => Err(anyhow!("Unsupported output format: {}", other)),
    }
}

fn print_text_report(report: &ValidationReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));
    println!("  Schema: {}", report.schema);
    println!("  Mode:   {}", report.mode);
    let mut metadata: Vec<_> = report.metadata.iter().collect();
    metadata.sort();
    for (key, value) in metadata {
        println!("  {}: {}", key, value);
    }

    if report.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    if !report.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for (i, error) in report.errors.iter().enumerate() {
            println!("  {}. {}", i + 1, error.to_string().red());
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Total errors: {}", report.stats.errors);
    println!("  Duration:     {} ms", report.stats.duration_ms);
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport, status: &ErrorStatus) -> Result<()> {
    let output = json!({
        "passed": report.passed,
        "schema": report.schema,
        "mode": report.mode.to_string(),
        "metadata": report.metadata,
        "errors": report.errors,
        "status": status,
        "summary": {
            "error_count": report.stats.errors,
            "duration_ms": report.stats.duration_ms,
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
