//! Error types for parsing user-supplied values and importing results files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while importing a results CSV.
///
/// None of these leave the store partially updated: the file is fully
/// parsed before any message type is touched.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    /// The file has no header row or no data rows.
    #[error("CSV file appears to be empty or invalid")]
    Empty,

    /// The header row lacks one or more of the results columns.
    #[error(
        "CSV file does not contain the expected headers (missing: {}). Please use an exported results file.",
        .missing.join(", ")
    )]
    MissingHeaders { missing: Vec<String> },

    /// The CSV tokenizer rejected the input.
    #[error("Error reading CSV file: {0}")]
    Read(#[from] csv::Error),

    /// The file could not be read from disk.
    #[error("Error reading file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseValueError {
    #[error("unknown frequency '{0}' (expected daily, weekly, bi-weekly, monthly or quarterly)")]
    UnknownFrequency(String),

    #[error("unknown channel '{0}' (expected sms, email or push)")]
    UnknownChannel(String),
}
