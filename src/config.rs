use std::path::PathBuf;

use clap::Parser;

/// Dataset read at startup when `--data` is not given.
pub const DEFAULT_DATA_FILE: &str = "employee_data.csv";

#[derive(Debug, Parser)]
#[command(about = "Interactive employee analytics dashboard.")]
pub struct Args {
    /// Employee table to load (.csv, .json or .parquet).
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,
}
