//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Load sample order records into a DynamoDB table
#[derive(Parser, Debug)]
#[command(name = "orders-loader")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Target table name [default: orders-table]
    #[arg(short, long, global = true, env = "ORDERS_TABLE")]
    pub table: Option<String>,

    /// AWS region [default: us-east-1]
    #[arg(short, long, global = true, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Dataset file (JSON array of records) [default: data/sample_dataset.json]
    #[arg(short, long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Custom DynamoDB endpoint, e.g. http://localhost:8000
    #[arg(long, global = true, env = "DYNAMODB_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Configuration file (JSON); flags override its values
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Load the dataset into the table (default)
    Load {
        /// Puts per BatchWriteItem call (1-25)
        #[arg(long)]
        batch_size: Option<usize>,

        /// Key attributes used to collapse duplicate puts within a batch
        /// (comma-separated)
        #[arg(long, value_delimiter = ',')]
        overwrite_by_keys: Option<Vec<String>>,

        /// Field reported in progress lines
        #[arg(long)]
        key_field: Option<String>,

        /// Write to an in-memory table instead of DynamoDB
        #[arg(long)]
        dry_run: bool,
    },

    /// Only check that the table exists and report its status
    Check,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Load {
            batch_size: None,
            overwrite_by_keys: None,
            key_field: None,
            dry_run: false,
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable progress lines
    Pretty,
    /// JSON output (one message per line)
    Json,
}
