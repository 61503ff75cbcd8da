use crate::feeds::DatasetKind;
use std::path::PathBuf;
use thiserror::Error;

/// A feed could not be turned into a typed table. Always fatal: the input is a
/// static file, so retrying cannot help.
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("Required feed '{dataset}' not found at {path}")]
    MissingFeed { dataset: DatasetKind, path: PathBuf },

    #[error("Failed to read feed '{dataset}' at {path}: {source}")]
    Io {
        dataset: DatasetKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Feed '{dataset}' is missing required columns: {}", columns.join(", "))]
    MissingColumns {
        dataset: DatasetKind,
        columns: Vec<String>,
    },

    #[error("Malformed record in feed '{dataset}' at line {line}: {reason}")]
    MalformedRecord {
        dataset: DatasetKind,
        line: u64,
        reason: String,
    },

    #[error("CSV error in feed '{dataset}': {source}")]
    Csv {
        dataset: DatasetKind,
        #[source]
        source: csv::Error,
    },
}
