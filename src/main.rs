use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, bail};
use rpa_receipt::application::{DraftService, ReceiptService};
use rpa_receipt::config::Settings;
use rpa_receipt::domain::format::format_currency;
use rpa_receipt::domain::record::{ServiceRecord, default_observation, present};
use rpa_receipt::domain::tax::{DEFAULT_ISS_PERCENT, TaxBreakdown, compute_taxes};
use rpa_receipt::interfaces::json::RecordReader;
use rpa_receipt::logging::init_cli_logger;
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding the saved draft
    #[arg(long, global = true)]
    draft_dir: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the PDF receipt for a service record
    Generate {
        /// Service record JSON file
        record: PathBuf,

        /// Directory the PDF is written to
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Issue date (YYYY-MM-DD), today when omitted
        #[arg(long)]
        issued_on: Option<NaiveDate>,

        /// Fill empty observations with the standard payment statement
        #[arg(long)]
        autofill_observations: bool,

        /// Do not keep the record as the saved draft
        #[arg(long)]
        no_save_draft: bool,
    },
    /// Show the withholdings for a gross value
    Taxes {
        #[arg(allow_negative_numbers = true)]
        gross: Decimal,

        #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_ISS_PERCENT)]
        iss_percent: Decimal,
    },
    /// Manage the saved draft
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },
}

#[derive(Subcommand)]
enum DraftAction {
    /// Save a service record as the draft
    Save { record: PathBuf },
    /// Print the saved draft as JSON
    Load,
    /// Remove the saved draft
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Tell whether a draft is saved
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    let output_dir = match &cli.command {
        Command::Generate { output_dir, .. } => output_dir.clone(),
        _ => PathBuf::from("."),
    };
    let settings = Settings::resolve(output_dir, cli.draft_dir, cli.db_path);

    match cli.command {
        Command::Taxes { gross, iss_percent } => {
            print_breakdown(&compute_taxes(gross.into(), iss_percent), iss_percent);
        }
        Command::Generate {
            record,
            issued_on,
            autofill_observations,
            no_save_draft,
            ..
        } => {
            let mut record = read_record(&record)?;
            if autofill_observations && present(&record.observations).is_none() {
                record.observations = Some(default_observation(&record.payment).into_diagnostic()?);
            }
            record.validate().into_diagnostic()?;

            let issued_on = issued_on.unwrap_or_else(|| Local::now().date_naive());
            let receipt = ReceiptService::default()
                .generate(&record, issued_on)
                .into_diagnostic()?;
            let path = receipt.write_to(&settings.output_dir).into_diagnostic()?;

            if !no_save_draft {
                let drafts = DraftService::new(settings.open_store().into_diagnostic()?);
                drafts.save(&record).await;
            }
            println!("{}", path.display());
        }
        Command::Draft { action } => {
            let drafts = DraftService::new(settings.open_store().into_diagnostic()?);
            match action {
                DraftAction::Save { record } => {
                    if !drafts.save(&read_record(&record)?).await {
                        bail!("the draft could not be saved");
                    }
                }
                DraftAction::Load => match drafts.load().await {
                    Some(record) => {
                        let json = serde_json::to_string_pretty(&record).into_diagnostic()?;
                        println!("{json}");
                    }
                    None => bail!("no saved draft"),
                },
                DraftAction::Clear { yes } => {
                    if yes {
                        drafts.clear().await;
                    } else if !drafts.clear_confirmed(&ask).await {
                        eprintln!("Draft kept.");
                    }
                }
                DraftAction::Status => {
                    if drafts.exists().await {
                        println!("saved");
                    } else {
                        println!("none");
                    }
                }
            }
        }
    }

    Ok(())
}

fn read_record(path: &Path) -> Result<ServiceRecord> {
    RecordReader::open(path)
        .and_then(|reader| reader.record())
        .into_diagnostic()
}

fn print_breakdown(breakdown: &TaxBreakdown, iss_percent: Decimal) {
    let rows = [
        ("Valor Bruto:".to_string(), breakdown.gross_value),
        ("(-) INSS (11%):".to_string(), breakdown.inss),
        (format!("(-) ISS ({}%):", iss_percent.normalize()), breakdown.iss),
        ("(-) IRRF:".to_string(), breakdown.irrf),
        ("Valor Líquido:".to_string(), breakdown.net_value),
    ];
    for (label, value) in rows {
        println!("{label:<16} {}", format_currency(value));
    }
}

/// Reads a yes/no answer from stdin; anything but yes counts as no.
fn ask(prompt: &str) -> bool {
    eprint!("{prompt} [s/N] ");
    let _ = io::stderr().flush();

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    )
}
