use std::path::PathBuf;

use thiserror::Error;

/// Why a dataset could not be loaded. Always fatal for that load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("unreadable column data: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("missing expected column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: rating '{value}' is not a number")]
    InvalidRating { row: usize, value: String },

    #[error("expected a top-level JSON array of records")]
    NotAnArray,

    #[error("row {0} is not a JSON object")]
    NotAnObject(usize),

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}
