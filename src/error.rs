//! Error handling for collection export operations.
//!
//! Provides error types with path context for workbook loading,
//! schema mapping, and output writing failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input file not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("failed to read workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    #[error("workbook {path} contains no worksheets")]
    EmptyWorkbook { path: PathBuf },

    #[error("required column '{column}' not found in input sheet")]
    MissingColumn { column: String },

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("KML serialization error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("failed to write output file {path}: {reason}")]
    OutputWrite { path: PathBuf, reason: String },
}

impl CollectionError {
    /// Build an output-write error from any displayable cause
    pub fn output_write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        CollectionError::OutputWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CollectionError>;
