// Error types for dataset access and trace building

use thiserror::Error;

/// Failures raised while reading a dataset or looking up one of its columns.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("column '{column}' not found (available: {})", available.join(", "))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    #[error("failed to parse '{value}' as number in column '{column}' at row {row}")]
    NotNumeric {
        column: String,
        row: usize,
        value: String,
    },

    #[error("dataset has no header row")]
    Empty,

    #[error("invalid JSON dataset: {0}")]
    Json(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Reasons a figure could not be built.
///
/// Everything except [`BuildError::Data`] is detected before a single column
/// is read, so no partial figure ever exists.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(
        "x and y specs must match the number of datasets ({datasets} datasets, {x} x specs, {y} y specs); \
         use nested lists for multiple columns from the same dataset"
    )]
    Cardinality { datasets: usize, x: usize, y: usize },

    #[error("passed more {attribute} values than datasets ({given} > {datasets})")]
    TooManyValues {
        attribute: &'static str,
        given: usize,
        datasets: usize,
    },

    #[error("x and y specs for dataset {dataset} differ in shape (x is {x}, y is {y})")]
    SeriesShape { dataset: usize, x: String, y: String },

    #[error(transparent)]
    Data(#[from] DataError),
}
