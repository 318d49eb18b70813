//! Procura command-line tool
//!
//! Inspects entity exports produced by the procurement screens without
//! opening the app.
//!
//! Usage:
//!   procura list supplier.csv --filter status=active
//!   procura search supplier.json acme
//!   procura validate purchaseOrder.csv
//!   procura convert supplier.csv --to json --output supplier.json
//!   procura inventory inventoryItem.csv
//!   procura expiry batch.json --window 14

use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use procura_cli::commands::{self, Input};
use procura_cli::config::ConfigLoad;
use procura_model::procurement::{Batch, InventoryItem};
use procura_store::ExportFormat;
use std::path::PathBuf;
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "procura")]
#[command(about = "Query, validate and convert Procura entity exports")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Entity type of the input (default: the file stem)
    #[arg(short, long, global = true)]
    entity_type: Option<String>,

    /// Input format (default: the file extension)
    #[arg(short, long, global = true)]
    format: Option<ExportFormat>,

    /// Path to config file (default: ./procura.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print entities, optionally filtered by field=value
    List {
        file: PathBuf,
        #[arg(long = "filter")]
        filters: Vec<String>,
    },
    /// Case-insensitive search across fields
    Search {
        file: PathBuf,
        query: String,
        /// Fields to search (default: config, then schema, then all)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,
    },
    /// Report entities missing required fields
    Validate {
        file: PathBuf,
        /// Required fields (default: config, then schema)
        #[arg(long, value_delimiter = ',')]
        required: Vec<String>,
    },
    /// Re-encode as JSON or CSV
    Convert {
        file: PathBuf,
        #[arg(long)]
        to: ExportFormat,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Reorder status of inventory items
    Inventory { file: PathBuf },
    /// Expiry status of batches
    Expiry {
        file: PathBuf,
        /// Reference date (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Look-ahead in days (default: config `expiry_window_days`)
        #[arg(long)]
        window: Option<u32>,
    },
}

impl Command {
    fn file(&self) -> &PathBuf {
        match self {
            Self::List { file, .. }
            | Self::Search { file, .. }
            | Self::Validate { file, .. }
            | Self::Convert { file, .. }
            | Self::Inventory { file }
            | Self::Expiry { file, .. } => file,
        }
    }
}

fn init_logging(verbose: bool, configured: &str) {
    let default = if verbose {
        Level::DEBUG.to_string()
    } else {
        configured.to_string()
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&default))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    let load = ConfigLoad::read(args.config.as_deref());
    let config = load.config();
    init_logging(args.verbose, &config.log_level);
    load.report();

    let input = Input::resolve(args.command.file(), args.entity_type.as_deref(), args.format)?;
    debug!(entity_type = %input.entity_type, format = %input.format, "Resolved input");

    let output = match &args.command {
        Command::List { filters, .. } => commands::list(&input.load_documents()?, filters)?,
        Command::Search { query, fields, .. } => {
            commands::search(&input.load_documents()?, &config, query, fields)
        }
        Command::Validate { required, .. } => {
            let summary = commands::validate(&input.load_documents()?, &config, required);
            println!("{}", summary.report);
            if summary.invalid > 0 {
                bail!("{} entities failed validation", summary.invalid);
            }
            return Ok(());
        }
        Command::Convert { to, output, .. } => {
            commands::convert(&input.load_documents()?, *to, output.as_deref())?
        }
        Command::Inventory { .. } => commands::inventory(&input.load_typed::<InventoryItem>()?),
        Command::Expiry { today, window, .. } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let window = window.unwrap_or(config.expiry_window_days);
            commands::expiry(&input.load_typed::<Batch>()?, today, window)
        }
    };

    println!("{output}");
    Ok(())
}
