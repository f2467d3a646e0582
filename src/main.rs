mod cli;

use std::path::PathBuf;

use clap::Parser;
use cli::{Cli, Commands, InteractiveMode, OutputFormat};
use colored::*;
use edenred_claims::{
    api::EdenredClient,
    claim::{ExpenseType, ReceiptJob},
    error::{self, ClaimError},
    manifest,
    submit::{BatchProcessor, BatchSummary, ClaimEngine, ProcessResult},
    utils, Config,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("edenred_claims=info,warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli, config) {
        error!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: Config) -> error::Result<()> {
    let token = resolve_token(cli.token.as_deref())?;
    let client = EdenredClient::new(&token, &config.api)?;
    let identity = client.identity().clone();

    // stdout carries only results
    eprintln!(
        "{}",
        format!(
            "Authenticated as: {} (Member ID: {})",
            identity.display_name, identity.member_id
        )
        .green()
    );

    let command = match cli.command {
        Some(command) => command,
        None => prompt_command()?,
    };

    let (jobs, delay) = match command {
        Commands::Whoami => {
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&identity)?),
                OutputFormat::Table => {
                    println!("  Name:       {}", identity.display_name);
                    println!("  Member ID:  {}", identity.member_id);
                    println!("  Company ID: {}", identity.company_id);
                }
            }
            return Ok(());
        }

        Commands::Single { image, date, merchant, expense_type } => {
            let job = ReceiptJob {
                image_path: image,
                expense_date: date,
                merchant_override: merchant,
                expense_type: ExpenseType::parse_lenient(&expense_type),
            };
            (vec![job], 0)
        }

        Commands::Csv { manifest: path, delay } => {
            info!("Reading manifest {}", path.display());
            let jobs = manifest::read_csv_manifest(&path)?;
            (jobs, delay.unwrap_or(config.batch.delay_seconds))
        }

        Commands::Dir { directory, expense_type, delay, yes } => {
            let jobs = manifest::scan_directory(&directory, ExpenseType::parse_lenient(&expense_type))?;
            eprintln!("Found {} files", jobs.len());

            if jobs.is_empty() {
                return Ok(());
            }
            if !yes && !utils::confirm_action("Continue?")? {
                eprintln!("Cancelled");
                return Ok(());
            }
            (jobs, delay.unwrap_or(config.batch.delay_seconds))
        }
    };

    let engine = ClaimEngine::new(client, identity.member_id);
    let processor = BatchProcessor::new(engine, delay);
    let summary = processor.process_batch(&jobs);

    report(&summary, cli.format)
}

/// Token from the flag, then `EDENRED_TOKEN`, then an interactive prompt
fn resolve_token(flag: Option<&str>) -> error::Result<String> {
    if let Some(token) = flag.filter(|t| !t.trim().is_empty()) {
        info!("Using token from command line parameter");
        return Ok(token.trim().to_string());
    }

    dotenv::dotenv().ok();
    if let Ok(token) = std::env::var("EDENRED_TOKEN") {
        if !token.trim().is_empty() {
            info!("Using token from EDENRED_TOKEN");
            return Ok(token.trim().to_string());
        }
    }

    let token = utils::prompt("Auth token: ")?;
    if token.is_empty() {
        return Err(ClaimError::InvalidCredential("no token provided".to_string()));
    }
    Ok(token)
}

/// Interactive mode selection when no subcommand was given
fn prompt_command() -> error::Result<Commands> {
    let mode = InteractiveMode::parse(&utils::prompt("Mode (1=single, 2=csv, 3=directory): ")?)?;

    match mode {
        InteractiveMode::Single => Ok(Commands::Single {
            image: PathBuf::from(utils::prompt("Image path: ")?),
            date: utils::prompt_optional("Date (YYYY-MM-DD) [auto]: ")?,
            merchant: utils::prompt_optional("Merchant [auto]: ")?,
            expense_type: utils::prompt_optional("Type [transit]: ")?
                .unwrap_or_else(|| "transit".to_string()),
        }),
        InteractiveMode::Csv => Ok(Commands::Csv {
            manifest: PathBuf::from(utils::prompt("CSV path: ")?),
            delay: None,
        }),
        InteractiveMode::Directory => Ok(Commands::Dir {
            directory: PathBuf::from(utils::prompt("Directory: ")?),
            expense_type: utils::prompt_optional("Expense type [transit]: ")?
                .unwrap_or_else(|| "transit".to_string()),
            delay: None,
            yes: false,
        }),
    }
}

fn report(summary: &BatchSummary, format: OutputFormat) -> error::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!();
    utils::print_table_border(100);
    utils::print_table_row(&["Status", "Receipt", "Amount", "Detail"], &[8, 40, 12, 34]);
    utils::print_table_border(100);

    for result in &summary.results {
        let path = utils::truncate_left(&result.image_path().display().to_string(), 40);
        match result {
            ProcessResult::Success { receipt_data, .. } => utils::print_table_row(
                &[
                    &"✓".green().to_string(),
                    &path,
                    &format!("${:.2}", receipt_data.amount),
                    &receipt_data.merchant_name,
                ],
                &[8, 40, 12, 34],
            ),
            ProcessResult::Error { error, receipt_data, .. } => utils::print_table_row(
                &[
                    &"✗".red().to_string(),
                    &path,
                    &receipt_data
                        .as_ref()
                        .map(|r| format!("${:.2}", r.amount))
                        .unwrap_or_default(),
                    error,
                ],
                &[8, 40, 12, 34],
            ),
        }
    }
    utils::print_table_border(100);

    summary.print_summary();
    Ok(())
}
