//! Askdocs CLI
//!
//! Main entry point for the askdocs service binary.
//! `askdocs serve` runs the question-answering HTTP server;
//! `askdocs sync` starts and waits on an index data-source sync job.

mod commands;

use clap::{Parser, Subcommand};
use commands::{ServeCommand, SyncCommand};
use askdocs_core::{config::ServiceConfig, logging, AppResult};

/// Askdocs - documentation question answering over a managed search index
#[derive(Parser, Debug)]
#[command(name = "askdocs")]
#[command(about = "Documentation question-answering service", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the question-answering HTTP server
    Serve(ServeCommand),

    /// Start an index data-source sync job and wait for it
    Sync(SyncCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // Required collaborator settings come from the environment; a missing
    // one fails here, before anything binds or connects.
    let config = ServiceConfig::load()?;
    let config = config.with_overrides(cli.log_level, cli.verbose, cli.no_color);

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Askdocs starting");
    tracing::debug!("Region: {}", config.region);
    tracing::debug!("Search index: {}", config.search_index_id);
    tracing::debug!("Model: {}", config.model_id);

    let command_name = match &cli.command {
        Commands::Serve(_) => "serve",
        Commands::Sync(_) => "sync",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Serve(cmd) => cmd.execute(&config).await,
        Commands::Sync(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
