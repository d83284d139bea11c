//! # Dataset Error Types Module
//!
//! This module defines the error types raised while loading the medicine dataset.
//! Every variant is fatal at startup: the bot never serves requests without a dataset.

use std::path::PathBuf;

/// Custom error types for dataset loading
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetError {
    /// The dataset file does not exist
    Missing(PathBuf),
    /// The dataset file exists but could not be opened or read
    Unreadable { path: PathBuf, reason: String },
    /// The file is not valid delimited text
    Malformed { line: Option<u64>, reason: String },
    /// None of the accepted name headers is present
    MissingNameColumn { headers: Vec<String> },
    /// The file parsed but contained no usable rows
    Empty,
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Missing(path) => {
                write!(f, "Dataset file not found: {}", path.display())
            }
            DatasetError::Unreadable { path, reason } => {
                write!(f, "Dataset file {} could not be read: {reason}", path.display())
            }
            DatasetError::Malformed {
                line: Some(line),
                reason,
            } => write!(f, "Malformed dataset at line {line}: {reason}"),
            DatasetError::Malformed { line: None, reason } => {
                write!(f, "Malformed dataset: {reason}")
            }
            DatasetError::MissingNameColumn { headers } => write!(
                f,
                "Dataset has no medicine name column (found headers: {})",
                headers.join(", ")
            ),
            DatasetError::Empty => write!(f, "Dataset contains no medicine records"),
        }
    }
}

impl std::error::Error for DatasetError {}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        DatasetError::Malformed {
            line: err.position().map(|pos| pos.line()),
            reason: err.to_string(),
        }
    }
}
