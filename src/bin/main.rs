use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use log::{debug, error, info};
use num_format::{Locale, ToFormattedString};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use deposito_hab::batch::{run_batch, BatchResult};
use deposito_hab::ingest::read_batch;
use deposito_hab::schema::deposit_schema;

/// A tool for generating fixed-width .hab deposit files from CSV batches
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a .hab deposit file from a CSV batch
    Generate {
        /// Input CSV file with the deposit instructions
        input: String,

        /// Deposit date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Output file path, defaults to deposito_<YYYYMMDD>.hab next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of parallel workers (0 = auto-detect)
        #[arg(short = 'w', long, default_value_t = 0)]
        workers: usize,
    },

    /// Resolve a batch and print the audit table without writing a file
    Preview {
        /// Input CSV file with the deposit instructions
        input: String,

        /// Deposit date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Maximum number of resolved rows to print
        #[arg(short, long, default_value_t = 10)]
        rows: usize,
    },
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            date,
            output,
            workers,
        } => generate(&input, date, output, workers),
        Commands::Preview { input, date, rows } => preview(&input, date, rows),
    }
}

/// Runs the batch once and writes the encoded payload.
fn generate(
    input: &str,
    date: Option<NaiveDate>,
    output: Option<PathBuf>,
    workers: usize,
) -> Result<()> {
    if workers > 0 {
        debug!("Setting up thread pool with {} workers", workers);
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build_global()
            .unwrap_or_else(|e| error!("Failed to initialize thread pool: {}", e));
    }

    let start_time = Instant::now();
    let fecha = format_fecha(date);
    info!("Generating .hab deposit file for date {}", fecha);

    let result = process(input, &fecha)?;
    log_summary(&result);

    let output_path = output
        .unwrap_or_else(|| Path::new(input).with_file_name(format!("deposito_{}.hab", fecha)));
    write_payload(&result.payload, &output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    info!(
        "Wrote {} records ({} bytes) to {} in {:.2?}",
        result.summary.processed.to_formatted_string(&Locale::en),
        result.payload.len().to_formatted_string(&Locale::en),
        output_path.display(),
        start_time.elapsed()
    );
    Ok(())
}

/// Runs the batch and prints the resolved table instead of writing a file.
fn preview(input: &str, date: Option<NaiveDate>, max_rows: usize) -> Result<()> {
    let fecha = format_fecha(date);
    let result = process(input, &fecha)?;
    log_summary(&result);

    println!("{}", result.columns.join(" | "));
    for row in result.rows.iter().take(max_rows) {
        println!("{}", row.values.join(" | "));
    }
    if result.rows.len() > max_rows {
        println!(
            "... {} more rows",
            (result.rows.len() - max_rows).to_formatted_string(&Locale::en)
        );
    }
    Ok(())
}

fn process(input: &str, fecha: &str) -> Result<BatchResult> {
    info!("Reading deposit batch: {}", input);
    let rows = read_batch(Path::new(input))
        .with_context(|| format!("Failed to read deposit batch from {}", input))?;
    info!(
        "Loaded {} records",
        rows.len().to_formatted_string(&Locale::en)
    );

    let schema = deposit_schema(fecha);
    run_batch(&schema, &rows).context("Failed to encode deposit batch")
}

fn format_fecha(date: Option<NaiveDate>) -> String {
    date.unwrap_or_else(|| Local::now().date_naive())
        .format("%Y%m%d")
        .to_string()
}

/// Stages the payload through a temp file in the target directory so a
/// failed run leaves no partial artifact.
fn write_payload(payload: &[u8], output_path: &Path) -> Result<()> {
    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(payload)?;
    tmp.flush()?;
    tmp.persist(output_path)?;
    Ok(())
}

fn log_summary(result: &BatchResult) {
    let summary = &result.summary;
    info!(
        "Total records: {}",
        summary.total.to_formatted_string(&Locale::en)
    );
    info!(
        "Excluded (CUOTA = '3'): {}",
        summary.excluded_cuota.to_formatted_string(&Locale::en)
    );
    info!(
        "Excluded (missing SOLICITUD): {}",
        summary.excluded_sin_solicitud.to_formatted_string(&Locale::en)
    );
    info!(
        "Processed records: {}",
        summary.processed.to_formatted_string(&Locale::en)
    );
    info!(
        "With CUIL_APODERADO: {}, without: {}",
        summary.with_apoderado.to_formatted_string(&Locale::en),
        summary.without_apoderado.to_formatted_string(&Locale::en)
    );
}
