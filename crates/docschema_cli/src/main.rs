mod commands;
mod document;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dse")]
#[command(version, about = "Document Schema Engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a document against a schema or an API operation
    Validate {
        /// Registry schema name or operation name (e.g. shortest_path)
        target: String,

        /// Path to the document (JSON, YAML or TOML)
        document: String,

        /// Check the operation's response body instead of its request body (operations only)
        #[arg(short, long)]
        response: bool,

        /// Report every violation instead of stopping at the first one
        #[arg(short, long)]
        accumulate: bool,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print the documentation of a schema or an API operation
    Describe {
        /// Registry schema name or operation name
        target: String,

        /// Describe the operation's response body instead of its request body (operations only)
        #[arg(short, long)]
        response: bool,

        /// Output format: text, markdown, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List registered schemas and API operations
    List {
        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .init();

    match cli.command {
        Commands::Validate {
            target,
            document,
            response,
            accumulate,
            format,
        } => commands::validate::execute(&target, &document, response, accumulate, &format),

        Commands::Describe {
            target,
            response,
            format,
        } => commands::describe::execute(&target, response, &format),

        Commands::List { format } => commands::list::execute(&format),
    }
}
