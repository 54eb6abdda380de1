//! Errors for reading panels from CSV and writing result tables.
use std::path::Path;

use crate::distance::errors::PanelError;

/// Result alias for CSV input/output.
pub type IoResult<T> = Result<T, IoError>;

#[derive(Debug, Clone, PartialEq)]
pub enum IoError {
    /// A file could not be opened or created.
    File { path: String, text: String },

    /// The CSV layer failed (malformed record, ragged row, write error).
    Csv { text: String },

    /// The header row has no date column.
    MissingDateColumn,

    /// The parsed content does not form a valid panel.
    Panel(PanelError),
}

impl IoError {
    pub fn file(path: &Path, err: &std::io::Error) -> Self {
        IoError::File { path: path.display().to_string(), text: err.to_string() }
    }
}

impl std::error::Error for IoError {}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoError::File { path, text } => write!(f, "Cannot access '{path}': {text}"),
            IoError::Csv { text } => write!(f, "CSV error: {text}"),
            IoError::MissingDateColumn => write!(f, "CSV header has no date column."),
            IoError::Panel(err) => write!(f, "{err}"),
        }
    }
}

impl From<::csv::Error> for IoError {
    fn from(err: ::csv::Error) -> Self {
        IoError::Csv { text: err.to_string() }
    }
}

impl From<std::io::Error> for IoError {
    fn from(err: std::io::Error) -> Self {
        IoError::Csv { text: err.to_string() }
    }
}

impl From<PanelError> for IoError {
    fn from(err: PanelError) -> Self {
        IoError::Panel(err)
    }
}
