//! Run configuration, loaded from `sheetcodec.toml`.
//!
//! ```toml
//! [layout]
//! data_start_row = 6
//!
//! [outputs.android]
//! file_name = "strings.xml"
//! destination = ["Translations", "Android"]
//!
//! [outputs.ios]
//! file_name = "Localizable.xcstrings"
//! ```
//!
//! Every table and field is optional.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::Error, formats::FormatType, layout::GridLayout};

pub const DEFAULT_CONFIG_FILE: &str = "sheetcodec.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub layout: GridLayout,
    pub outputs: Outputs,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Outputs {
    pub android: OutputConfig,
    pub ios: OutputConfig,
}

/// Overrides for where one format's document is stored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub file_name: Option<String>,
    pub destination: Option<Vec<String>>,
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        Ok(toml::from_str(s)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn output(&self, format: FormatType) -> &OutputConfig {
        match format {
            FormatType::AndroidXml => &self.outputs.android,
            FormatType::StringCatalog => &self.outputs.ios,
        }
    }

    /// File name for `format`, falling back to the format's default.
    pub fn file_name(&self, format: FormatType) -> String {
        self.output(format)
            .file_name
            .clone()
            .unwrap_or_else(|| format.file_name().to_string())
    }

    /// Destination for `format`, falling back to the format's default.
    pub fn destination(&self, format: FormatType) -> Vec<String> {
        self.output(format)
            .destination
            .clone()
            .unwrap_or_else(|| format.destination())
    }
}
