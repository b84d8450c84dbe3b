use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("unsupported source format: {} (expected .csv or .csv.gz)", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV decode failed: {0}")]
    Decode(#[from] polars::error::PolarsError),

    #[error("HTTP download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Object storage error: {0}")]
    Bucket(#[from] tripdata_bucket::BucketError),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("unknown dataset '{0}'")]
    UnknownDataset(String),

    #[error("dataset '{dataset}' has no slice for period {period}")]
    InactivePeriod { dataset: String, period: String },
}

pub type Result<T> = std::result::Result<T, IngestError>;
