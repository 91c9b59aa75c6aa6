//! CLI command definitions for the `fwz` binary.

pub mod dashboard;
pub mod fill;
pub mod parse;
pub mod schema;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Spreadsheet-driven application form wizard.
#[derive(Parser)]
#[command(name = "fwz", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write log lines as JSON to stderr.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export tracing spans to stdout via OpenTelemetry.
    #[arg(long, global = true, hide = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to read the schema sheet from.
#[derive(Args, Debug, Clone, Default)]
pub struct SchemaArgs {
    /// Local CSV export of the schema sheet.
    #[arg(long, conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// CSV export URL (overrides `schema_url` from config.toml).
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile the schema sheet and show its steps and fields.
    Schema {
        #[command(flatten)]
        source: SchemaArgs,
    },

    /// Report key collisions and skipped columns in the schema sheet.
    Check {
        #[command(flatten)]
        source: SchemaArgs,
    },

    /// Tokenize a CSV file and print its rows.
    Parse {
        /// CSV file to read.
        file: PathBuf,
    },

    /// Fill in the application form step by step.
    Fill {
        #[command(flatten)]
        source: SchemaArgs,

        /// JSON object of field values; skips the interactive prompts.
        #[arg(long)]
        values: Option<PathBuf>,
    },

    /// Show submissions with their scores.
    Dashboard {
        /// Keep refreshing until Ctrl+C.
        #[arg(long)]
        watch: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn schema_file_and_url_conflict() {
        let result = Cli::try_parse_from(["fwz", "schema", "--file", "a.csv", "--url", "http://x"]);
        assert!(result.is_err());
    }

    #[test]
    fn fill_accepts_values_file() {
        let cli = Cli::try_parse_from(["fwz", "fill", "--values", "answers.json", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Fill { values, source } => {
                assert_eq!(values, Some(PathBuf::from("answers.json")));
                assert!(source.file.is_none());
            }
            _ => panic!("expected fill"),
        }
    }
}
