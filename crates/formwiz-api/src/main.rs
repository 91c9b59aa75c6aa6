//! formwiz command-line entry point.
//!
//! Binary name: `fwz`
//!
//! Parses CLI arguments, installs logging, loads `config.toml`, then
//! dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use formwiz_observe::{init_tracing, shutdown_tracing, TracingOptions};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&TracingOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        json: cli.log_json,
        otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "fwz", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await;

    match cli.command {
        Commands::Schema { source } => {
            cli::schema::show_schema(&state, &source, cli.json, cli.quiet).await?;
        }

        Commands::Check { source } => {
            cli::schema::check_schema(&state, &source, cli.json).await?;
        }

        Commands::Parse { file } => {
            cli::parse::parse_file(&file, cli.json).await?;
        }

        Commands::Fill { source, values } => match values {
            Some(path) => cli::fill::fill_from_file(&state, &source, &path, cli.json).await?,
            None => cli::fill::fill_interactive(&state, &source).await?,
        },

        Commands::Dashboard { watch } => {
            cli::dashboard::dashboard(&state, watch, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
