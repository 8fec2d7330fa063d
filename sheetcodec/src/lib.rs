#![forbid(unsafe_code)]
//! Turns translation spreadsheets into platform localization catalogs.
//!
//! A translation table is a grid: column 0 holds translator comments, every
//! later column is one language (display name, code and long name in the
//! first header rows, one translation per data row below). The first
//! language column is the source language and provides the keys.
//!
//! # Quick Start
//!
//! ```rust
//! use sheetcodec::{FormatType, RawSheet, convert_grids};
//!
//! let grid = RawSheet::from_rows(
//!     "Main",
//!     [
//!         ["", "English", "French"],
//!         ["", "en", "fr"],
//!         ["", "English (US)", "Français"],
//!         ["", "", ""],
//!         ["", "", ""],
//!         ["", "", ""],
//!         ["Shown on launch", "welcome", "Bienvenue"],
//!         ["", "goodbye", "Au revoir"],
//!     ],
//! );
//! let xml = convert_grids(vec![grid], FormatType::AndroidXml)?;
//! assert!(xml.contains(r#"<item qualifier="locale/fr">Bienvenue</item>"#));
//! # Ok::<(), sheetcodec::Error>(())
//! ```
//!
//! # Supported Formats
//!
//! - **Android `strings.xml`**: source text plus `locale/<code>` qualified items
//! - **Apple string catalog**: `sourceLanguage` / `strings` / `version` JSON
//!
//! Rows whose key or value starts with `//` are author notes and never
//! become translations.

pub mod config;
pub mod error;
pub mod formats;
pub mod grid;
pub mod layout;
pub mod pipeline;
pub mod source;
pub mod storage;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    config::Config,
    error::{Error, Stage, StorageError},
    formats::{Document, FormatType},
    grid::{Grid, GridParser, RawSheet},
    layout::GridLayout,
    pipeline::{OutputTarget, Pipeline, RunReport, convert_grids, generate},
    source::{DelimitedSource, GridSource, MemorySource},
    storage::{FileSystemStorage, MemoryStorage, StorageAdapter, StoredDocument},
    types::{COMMENT_MARKER, LocalizedColumn, LocalizedString, Sheet},
};
