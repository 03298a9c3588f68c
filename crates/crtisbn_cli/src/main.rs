//! crtisbn CLI
//!
//! Command-line tools for the CRT identifier engine.
//!
//! # Commands
//!
//! - `generate` - Mint one identifier for a region/publisher pair
//! - `batch` - Mint several identifiers under one prefix
//! - `validate` - Check one identifier against the congruence rule
//! - `scan` - Extract and check every identifier listed in a text file
//! - `list` - Show issued identifiers, grouped by publisher code
//! - `count` - Show the total number of issued identifiers

mod commands;

use clap::{Parser, Subcommand};
use crtisbn_core::Engine;
use crtisbn_store::{FileBackend, Ledger};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// CRT identifier generation and validation tools.
#[derive(Parser)]
#[command(name = "crtisbn")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the ledger file
    #[arg(global = true, short, long, default_value = "generated_isbns.json")]
    store: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint one identifier
    Generate {
        /// Single-digit region code
        #[arg(short, long, default_value = "3")]
        region: u8,

        /// Two-digit publisher code (0-99)
        #[arg(short, long, default_value = "16")]
        publisher: u8,

        /// Skip the suffix-multiple strategy
        #[arg(long)]
        no_multiples: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Mint several identifiers under one prefix
    Batch {
        /// Single-digit region code
        #[arg(short, long, default_value = "3")]
        region: u8,

        /// Two-digit publisher code (0-99)
        #[arg(short, long, default_value = "16")]
        publisher: u8,

        /// How many identifiers to mint
        #[arg(short, long)]
        count: usize,

        /// Skip the suffix-multiple strategy
        #[arg(long)]
        no_multiples: bool,
    },

    /// Check one identifier against the congruence rule
    Validate {
        /// The 13-digit identifier
        isbn: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Extract and check every identifier listed in a text file
    Scan {
        /// The file to scan
        file: PathBuf,
    },

    /// Show issued identifiers, grouped by publisher code
    List {
        /// Restrict to one publisher code
        #[arg(short, long)]
        publisher: Option<u8>,
    },

    /// Show the total number of issued identifiers
    Count,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let ledger = Ledger::open(FileBackend::new(&cli.store));
    let mut engine = Engine::new(ledger);

    match cli.command {
        Commands::Generate {
            region,
            publisher,
            no_multiples,
            format,
        } => commands::generate::run(&mut engine, region, publisher, !no_multiples, &format)?,
        Commands::Batch {
            region,
            publisher,
            count,
            no_multiples,
        } => commands::batch::run(&mut engine, region, publisher, count, !no_multiples)?,
        Commands::Validate { isbn, format } => {
            commands::validate::run(&engine, &isbn, &format)?;
        }
        Commands::Scan { file } => commands::scan::run(&engine, &file)?,
        Commands::List { publisher } => commands::list::run(&engine, publisher),
        Commands::Count => {
            use crtisbn_store::IdentifierStore;
            println!("{}", engine.store().count());
        }
    }

    Ok(())
}
