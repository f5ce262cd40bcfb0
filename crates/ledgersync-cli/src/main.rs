//! Ledgersync - billing data sync tool

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ledgersync_common::logging::{init_logging, LogConfig, LogLevel};
use ledgersync_common::EntityKind;

use commands::SourceArg;

#[derive(Parser, Debug)]
#[command(name = "ledgersync")]
#[command(author, version, about = "Sync billing data from a payment platform into PostgreSQL")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sync every entity kind in dependency order
    Sync {
        /// Where to read raw objects from
        #[arg(long, value_enum)]
        source: SourceArg,

        /// Directory of JSON export files (required for --source files)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Run the full pipeline against an in-memory store; writes nothing
        #[arg(long)]
        dry_run: bool,
    },

    /// Sync a single entity kind
    SyncEntity {
        /// Entity kind (customer, payment_method, product, price,
        /// subscription, invoice, payment_intent, charge)
        kind: EntityKind,

        /// Where to read raw objects from
        #[arg(long, value_enum)]
        source: SourceArg,

        /// Directory of JSON export files
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Explicit export file path (overrides --dir)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Run the full pipeline against an in-memory store; writes nothing
        #[arg(long)]
        dry_run: bool,
    },

    /// Compare export file object counts against database row counts
    Verify {
        /// Directory of JSON export files
        #[arg(long)]
        dir: PathBuf,
    },

    /// Check configuration and database connectivity
    Status,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("ledgersync")
        .build();

    // Environment variables take precedence over the verbosity flag.
    let log_config = LogConfig::from_env().unwrap_or(log_config);

    if let Err(e) = init_logging(&log_config) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Sync {
            source,
            dir,
            dry_run,
        } => commands::sync::run_all(source, dir, dry_run).await,

        Commands::SyncEntity {
            kind,
            source,
            dir,
            file,
            dry_run,
        } => commands::sync::run_entity(kind, source, dir, file, dry_run).await,

        Commands::Verify { dir } => commands::verify::run(dir).await,

        Commands::Status => commands::status::run().await,
    }
}
