use chrono::NaiveDate;
use thiserror::Error;

/// Failures of the dataset preparation and filtering pipeline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataError {
    #[error("row {row}: cannot interpret '{value}' as {column}")]
    Parse {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("required column '{0}' is missing")]
    MissingColumn(&'static str),

    #[error("dataset has no rows, date bounds are undefined")]
    EmptyDataset,

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

pub type DataResult<T> = Result<T, DataError>;
