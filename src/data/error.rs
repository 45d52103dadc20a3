use thiserror::Error;

/// Anything that prevents a dataset from loading completely.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: '{value}' is not a percentage in [0, 100]")]
    InvalidPercentage { row: usize, value: String },

    #[error("row {row}: unknown age group '{value}'")]
    InvalidAgeGroup { row: usize, value: String },

    #[error("row {row}: {message}")]
    MalformedRow { row: usize, message: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}
