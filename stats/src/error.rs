use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to turn a stored season file into a [`crate::SeasonTable`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed csv in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: header {header:?} is not of the form \"Category, SubField\"", path.display())]
    Header { path: PathBuf, header: String },

    #[error("{}: required column \"{category}, {field}\" is missing", path.display())]
    MissingColumn {
        path: PathBuf,
        category: &'static str,
        field: &'static str,
    },

    #[error("{}: row {row}, column {column:?}: {value:?} is not a number", path.display())]
    Value {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    #[error("{}: week label {week} on row {row} does not follow week {previous}", path.display())]
    WeekOrder {
        path: PathBuf,
        row: usize,
        week: u32,
        previous: u32,
    },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Io { path, .. }
            | LoadError::Csv { path, .. }
            | LoadError::Header { path, .. }
            | LoadError::MissingColumn { path, .. }
            | LoadError::Value { path, .. }
            | LoadError::WeekOrder { path, .. } => path,
        }
    }
}

/// A selector label outside the recognized metric set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized metric {0:?}")]
pub struct InvalidMetric(pub String);
