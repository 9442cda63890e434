use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Load errors – everything that can make the dataset unusable
// ---------------------------------------------------------------------------

/// Errors raised while obtaining, parsing or validating the dataset.
///
/// None of these are retried: once a load fails the session keeps the
/// failure and the user needs to restart (or delete the cache files).
#[derive(Debug, Error)]
pub enum LoadError {
    /// Download or archive extraction failed.
    #[error("failed to fetch dataset from {locator}: {reason}")]
    SourceFetch { locator: String, reason: String },

    /// A record could not be read as CSV.
    #[error("malformed CSV at record {row}: {reason}")]
    Parse { row: u64, reason: String },

    /// A feature cell is outside the canonical truthiness encoding.
    #[error("record {row}, column '{column}': '{value}' is not a symptom flag")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },

    /// No column name contains "disease".
    #[error("no disease column found among {} columns", columns.len())]
    Schema { columns: Vec<String> },

    /// The label is the only column.
    #[error("no symptom columns besides '{label}'")]
    NoFeatureColumns { label: String },

    /// Two columns share a name.
    #[error("column '{name}' appears more than once")]
    DuplicateColumn { name: String },

    /// Header present but no data rows.
    #[error("dataset contains no rows")]
    EmptyDataset,

    /// Reading or writing one of the cache files failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An earlier load in this session already failed.
    #[error("dataset unavailable: {0}")]
    Unavailable(String),
}

impl LoadError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn fetch(locator: impl Into<String>, reason: impl ToString) -> Self {
        LoadError::SourceFetch {
            locator: locator.into(),
            reason: reason.to_string(),
        }
    }

    /// Convert a `csv` error into [`LoadError::Parse`], keeping the record
    /// number when the reader knows it.
    pub fn from_csv(err: &csv::Error) -> Self {
        let row = err.position().map(|p| p.record()).unwrap_or(0);
        LoadError::Parse {
            row,
            reason: err.to_string(),
        }
    }

    /// Message suitable for the dismissible error banner.
    pub fn user_message(&self) -> String {
        match self {
            LoadError::SourceFetch { .. } => {
                format!("Could not download the dataset. {self}")
            }
            LoadError::Parse { .. }
            | LoadError::InvalidCell { .. }
            | LoadError::DuplicateColumn { .. } => {
                format!("The dataset could not be read. {self}")
            }
            LoadError::Schema { .. }
            | LoadError::NoFeatureColumns { .. }
            | LoadError::EmptyDataset => {
                "Dataset is empty or disease column not found.".to_string()
            }
            LoadError::Io { .. } => format!("Cache file problem. {self}"),
            LoadError::Unavailable(reason) => {
                format!("Dataset unavailable for this session: {reason}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Query errors – rejected before any dataset scan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("please select at least one symptom")]
    EmptySelection,

    #[error("unknown symptom: {0}")]
    UnknownFeature(String),
}
