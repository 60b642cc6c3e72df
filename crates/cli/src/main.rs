//! Nursery CLI - snapshot and data management tools.
//!
//! # Usage
//!
//! ```bash
//! # Pull the published db.json into the local data directory
//! nursery fetch
//!
//! # Export the catalog
//! nursery export csv products.csv
//! nursery export db db.json
//! nursery export backup backup.json
//!
//! # Import products from a semicolon CSV
//! nursery import products.csv
//!
//! # Restore a backup / reset to the seed dataset (both need --yes)
//! nursery restore backup.json --yes
//! nursery reset --yes
//! ```
//!
//! # Commands
//!
//! - `fetch` - Pull the remote snapshot into local state
//! - `export` - Write the catalog as CSV, `db.json` or a backup
//! - `import` - Upsert products from a CSV file
//! - `restore` - Replace local state from a backup file
//! - `reset` - Reset products and categories to the seed dataset

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "nursery")]
#[command(author, version, about = "Nursery store management tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the remote db.json snapshot into the local data directory
    Fetch {
        /// Snapshot URL (defaults to `NURSERY_DB_URL`)
        #[arg(short, long)]
        url: Option<String>,
    },
    /// Export local state to a file
    Export {
        #[command(subcommand)]
        target: ExportTarget,
    },
    /// Import products from a semicolon-delimited CSV file
    Import {
        /// CSV file to read
        file: PathBuf,
    },
    /// Replace local state from a backup file
    Restore {
        /// Backup JSON file to read
        file: PathBuf,

        /// Confirm overwriting the current state
        #[arg(long)]
        yes: bool,
    },
    /// Reset products and categories to the embedded seed dataset
    Reset {
        /// Confirm discarding the current products and categories
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ExportTarget {
    /// Semicolon CSV of all products
    Csv { out: PathBuf },
    /// The full db.json snapshot
    Db { out: PathBuf },
    /// A versioned backup document
    Backup { out: PathBuf },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Fetch { url } => commands::fetch::run(url).await?,
        Commands::Export { target } => match target {
            ExportTarget::Csv { out } => commands::export::csv(&out)?,
            ExportTarget::Db { out } => commands::export::db(&out)?,
            ExportTarget::Backup { out } => commands::export::backup(&out)?,
        },
        Commands::Import { file } => commands::import::run(&file)?,
        Commands::Restore { file, yes } => commands::restore::run(&file, yes)?,
        Commands::Reset { yes } => commands::restore::reset(yes)?,
    }
    Ok(())
}
