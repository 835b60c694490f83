//! EntryStore CLI
//!
//! Command-line tools for EntryStore documents whose entries are JSON
//! objects identified by their `"id"` field.
//!
//! # Commands
//!
//! - `inspect` - Display file and document statistics
//! - `verify` - Strictly decode the document
//! - `list` - Print every record
//! - `get` - Print the record with a given id
//! - `put` - Add or replace a record
//! - `delete` - Delete the record with a given id

mod commands;
mod error;
mod record;

use clap::{Parser, Subcommand, ValueEnum};
use entrystore_codec::{DocumentCodec, JsonCodec, JsonLinesCodec};
use record::Record;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// EntryStore command-line document tools.
#[derive(Parser)]
#[command(name = "entrystore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the store file
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Document format
    #[arg(global = true, short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Document formats understood by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// A single JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

impl Format {
    /// Returns the codec for this format.
    pub fn codec(self) -> Box<dyn DocumentCodec<Record>> {
        match self {
            Self::Json => Box::new(JsonCodec::pretty()),
            Self::Jsonl => Box::new(JsonLinesCodec),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Display file and document statistics
    Inspect {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Strictly decode the document and report problems
    Verify,

    /// Print every record
    List,

    /// Print the record with the given id
    Get {
        /// Record id (parsed as JSON, otherwise taken as a string)
        id: String,
    },

    /// Add a record, replacing an existing record with the same id
    Put {
        /// The record as a JSON object
        record: String,

        /// Keep an existing record with the same id instead of replacing it
        #[arg(long)]
        no_overwrite: bool,
    },

    /// Delete the record with the given id
    Delete {
        /// Record id (parsed as JSON, otherwise taken as a string)
        id: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Version = cli.command {
        println!("EntryStore CLI v{}", env!("CARGO_PKG_VERSION"));
        println!("EntryStore Core v{}", entrystore_core::VERSION);
        return Ok(());
    }

    let path = cli.path.ok_or("Store path required (--path)")?;
    match cli.command {
        Commands::Inspect { json } => commands::inspect::run(&path, cli.format, json)?,
        Commands::Verify => commands::verify::run(&path, cli.format)?,
        Commands::List => commands::records::list(&path, cli.format)?,
        Commands::Get { id } => commands::records::get(&path, cli.format, &id)?,
        Commands::Put {
            record,
            no_overwrite,
        } => commands::records::put(&path, cli.format, &record, !no_overwrite)?,
        Commands::Delete { id } => commands::records::delete(&path, cli.format, &id)?,
        Commands::Version => {}
    }

    Ok(())
}
