//! All error types for the sheetcodec crate.
//!
//! Every fallible operation (fetching grids, parsing, serializing, storing)
//! returns [`Error`]. [`Error::stage`] tells the caller which step of a
//! generation run failed.

use std::{fmt::Display, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed grid: {0}")]
    Structural(String),

    #[error("key `{key}` in column `{language_code}` was never declared by the source language")]
    ConsistencyFault { key: String, language_code: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("cannot read configuration `{}`: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures reported by a [`crate::storage::StorageAdapter`].
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error at `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid destination segment `{0}`")]
    InvalidDestination(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// The step of a generation run an [`Error`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Config,
    Fetch,
    Parse,
    Serialize,
    Store,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Config => write!(f, "config"),
            Stage::Fetch => write!(f, "fetch"),
            Stage::Parse => write!(f, "parse"),
            Stage::Serialize => write!(f, "serialize"),
            Stage::Store => write!(f, "store"),
        }
    }
}

impl Error {
    /// Creates a new structural error for the named sheet.
    pub fn structural(sheet: &str, message: impl Display) -> Self {
        Error::Structural(format!("sheet `{}`: {}", sheet, message))
    }

    pub fn stage(&self) -> Stage {
        match self {
            Error::Config(_) | Error::ConfigIo { .. } | Error::UnknownFormat(_) => Stage::Config,
            Error::CsvParse(_) | Error::Io(_) => Stage::Fetch,
            Error::Structural(_) => Stage::Parse,
            Error::ConsistencyFault { .. }
            | Error::InvalidCatalog(_)
            | Error::Json(_)
            | Error::Xml(_) => Stage::Serialize,
            Error::Storage(_) => Stage::Store,
        }
    }
}
