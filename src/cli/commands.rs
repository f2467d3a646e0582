use clap::{Parser, Subcommand, ValueEnum};
use edenred_claims::ClaimError;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "edenred-claims")]
#[command(about = "Upload receipts and submit Edenred benefits claims in batch")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Bearer token (falls back to EDENRED_TOKEN, then a prompt)
    #[arg(short, long, global = true)]
    pub token: Option<String>,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config/default")]
    pub config: String,

    /// Output format for results
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a claim for a single receipt
    Single {
        /// Receipt image or PDF
        image: PathBuf,

        /// Expense date (YYYY-MM-DD), defaults to the receipt date
        #[arg(short, long)]
        date: Option<String>,

        /// Merchant name, defaults to the scanned one
        #[arg(short, long)]
        merchant: Option<String>,

        /// Expense type: transit, parking or bike
        #[arg(short, long, default_value = "transit")]
        expense_type: String,
    },

    /// Submit claims listed in a CSV manifest
    Csv {
        /// CSV with image_path,expense_date,merchant_name,expense_type columns
        manifest: PathBuf,

        /// Seconds to wait between receipts
        #[arg(long)]
        delay: Option<u64>,
    },

    /// Submit claims for every receipt file in a directory
    Dir {
        /// Directory holding .jpg, .jpeg, .png and .pdf receipts
        directory: PathBuf,

        /// Expense type applied to every receipt
        #[arg(short, long, default_value = "transit")]
        expense_type: String,

        /// Seconds to wait between receipts
        #[arg(long)]
        delay: Option<u64>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the identity decoded from the token
    Whoami,
}

/// Mode picked at the interactive prompt when no subcommand is given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractiveMode {
    Single,
    Csv,
    Directory,
}

impl InteractiveMode {
    pub fn parse(answer: &str) -> Result<Self, ClaimError> {
        match answer.trim() {
            "1" => Ok(InteractiveMode::Single),
            "2" => Ok(InteractiveMode::Csv),
            "3" => Ok(InteractiveMode::Directory),
            other => Err(ClaimError::Other(anyhow::anyhow!(
                "Unknown mode '{}', expected 1, 2 or 3",
                other
            ))),
        }
    }
}
