use std::path::PathBuf;

use anyhow::{Context, Result};
use arrow::util::pretty::pretty_format_batches;
use clap::Parser;

use employee_dashboard::config::DEFAULT_DATA_FILE;
use employee_dashboard::data::sample::{generate_records, record_batch, write_file};

#[derive(Parser)]
#[command(about = "Write a synthetic employee table for the dashboard.")]
struct Args {
    /// Output file; .csv, .json or .parquet.
    #[arg(default_value = DEFAULT_DATA_FILE)]
    output: PathBuf,

    /// Number of employees to generate.
    #[arg(long, default_value_t = 300)]
    rows: usize,

    /// PRNG seed; the same seed always produces the same table.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let records = generate_records(args.rows, args.seed);
    write_file(&args.output, &records)?;

    let preview = record_batch(&records[..records.len().min(5)])?;
    let table = pretty_format_batches(&[preview]).context("formatting preview")?;
    println!("{table}");
    println!(
        "Wrote {} employees to {}",
        records.len(),
        args.output.display()
    );
    Ok(())
}
