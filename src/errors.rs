//! Errors
//!
//! Custom error types used throughout the `cartree` crate.
use thiserror::Error;

/// Errors that can occur while building or using a decision tree.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// Every candidate split leaves one side empty.
    #[error("No valid split found for {0} samples, every candidate split leaves one side empty.")]
    NoValidSplit(usize),
    /// A node splits on a feature the query vector does not have.
    #[error("Node splits on feature {feature}, but the supplied vector only has {len} values.")]
    DimensionMismatch { feature: usize, len: usize },
    /// Tried to build a tree without any samples.
    #[error("Unable to build a tree from an empty dataset.")]
    EmptyDataset,
    /// The labels are not parallel to the rows of the data.
    #[error("The data has {rows} rows, but {labels} labels were provided.")]
    LabelLengthMismatch { rows: usize, labels: usize },
    /// The flat buffer does not match the declared shape.
    #[error("Expected {expected} values for the declared shape, but {found} were provided.")]
    DataShape { expected: usize, found: usize },
    /// The row index of a matrix points past its last row.
    #[error("Row index {index} is out of bounds for a matrix with {rows} rows.")]
    RowIndexOutOfBounds { index: usize, rows: usize },
    /// A row does not have the same number of features as the first row.
    #[error("Row {row} has {found} features, expected {expected}.")]
    RaggedRow { row: usize, expected: usize, found: usize },
    /// NaN value found in the training features.
    #[error("A NaN value was found at row {row}, feature {feature}. Missing values are not supported.")]
    NanValueFound { row: usize, feature: usize },
    /// Prediction was requested before fitting.
    #[error("The classifier has not been fitted yet.")]
    NotFitted,
    /// Invalid value parsing.
    #[error("Invalid value {0} passed for {1}, expected one of {2}.")]
    ParseString(String, String, String),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// Unable to write the configuration.
    #[error("Unable to write configuration: {0}")]
    UnableToWrite(String),
    /// Unable to read the configuration.
    #[error("Unable to read configuration: {0}")]
    UnableToRead(String),
    /// The training thread pool could not be created.
    #[error("Unable to build the thread pool: {0}")]
    ThreadPool(String),
}
