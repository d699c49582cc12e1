use thiserror::Error;

/// The CSV source cannot be turned into a [`MetricTable`](super::model::MetricTable).
#[derive(Debug, Error)]
pub enum DataFormatError {
    #[error("CSV missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("CSV line {line}, column '{column}': {message}")]
    InvalidValue {
        line: u64,
        column: String,
        message: String,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// A figure was requested for a column the table does not carry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("column '{column}' not found in metric table")]
pub struct ColumnNotFoundError {
    pub column: String,
}
