//! Apple string catalog (`.xcstrings` JSON).
//!
//! ```json
//! {
//!   "sourceLanguage": "en",
//!   "strings": {
//!     "welcome": {
//!       "localizations": {
//!         "fr": { "stringUnit": { "state": "translated", "value": "Bienvenue" } }
//!       },
//!       "comment": "Shown on launch"
//!     }
//!   },
//!   "version": "1.0"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    io::{BufRead, Write},
};

use crate::{
    error::Error,
    traits::{CatalogReader, CatalogSerializer},
    types::Sheet,
};

pub const CATALOG_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Format {
    pub source_language: String,
    pub strings: BTreeMap<String, Item>,
    pub version: String,
}

impl Default for Format {
    fn default() -> Self {
        Self {
            source_language: String::new(),
            strings: BTreeMap::new(),
            version: CATALOG_VERSION.to_string(),
        }
    }
}

impl Format {
    pub fn get(&self, key: &str) -> Option<&Item> {
        self.strings.get(key)
    }
}

impl CatalogSerializer for Format {
    /// Every keyed source row gets an item, `//` keys included. Rows with an
    /// empty key are dropped, so padding rows never produce a `""` entry.
    fn from_sheets(sheets: &[Sheet]) -> Result<Self, Error> {
        let mut format = Format::default();

        for sheet in sheets {
            let Some(source) = sheet.source_column() else {
                continue;
            };

            // The last sheet decides the catalog's source language.
            format.source_language = source.language_code().to_string();
            for string in source.strings() {
                if !string.has_key() {
                    continue;
                }
                format.strings.entry(string.key().to_string()).or_default();
            }

            for column in sheet.translation_columns() {
                for string in column.strings() {
                    if !string.is_translation() {
                        continue;
                    }

                    let item = format.strings.get_mut(string.key()).ok_or_else(|| {
                        Error::ConsistencyFault {
                            key: string.key().to_string(),
                            language_code: column.language_code().to_string(),
                        }
                    })?;

                    item.localizations.insert(
                        column.language_code().to_string(),
                        Localization::from(StringUnit::translated(string.value())),
                    );
                    if !string.comment().is_empty() {
                        item.comment = Some(string.comment().to_string());
                    }
                }
            }
        }

        Ok(format)
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, &self)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

impl CatalogReader for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Json)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub localizations: BTreeMap<String, Localization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Item {
    /// Translated text for a language code, if present.
    pub fn value(&self, language_code: &str) -> Option<&str> {
        self.localizations
            .get(language_code)
            .map(|localization| localization.string_unit.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Localization {
    pub string_unit: StringUnit,
}

impl From<StringUnit> for Localization {
    fn from(string_unit: StringUnit) -> Self {
        Localization { string_unit }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StringUnit {
    pub state: UnitState,
    pub value: String,
}

impl StringUnit {
    pub fn translated(value: &str) -> Self {
        Self {
            state: UnitState::Translated,
            value: value.to_string(),
        }
    }
}

/// Translation state of a string unit. Generated catalogs only use `Translated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitState {
    Translated,
    NeedsReview,
    New,
    Stale,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LocalizedColumn, LocalizedString};

    fn column(code: &str, rows: &[(&str, &str, &str)]) -> LocalizedColumn {
        LocalizedColumn::new(
            code,
            code,
            code,
            rows.iter()
                .map(|(key, value, comment)| LocalizedString::new(*key, *value, *comment))
                .collect(),
        )
    }

    #[test]
    fn test_localizations_accumulate_across_columns() {
        let sheet = Sheet::new(
            "Main",
            vec![
                column("en", &[("hello", "Hello", "Greeting")]),
                column("fr", &[("hello", "Bonjour", "Greeting")]),
                column("de", &[("hello", "Hallo", "Greeting")]),
            ],
        );
        let format = Format::from_sheets(&[sheet]).unwrap();
        assert_eq!(format.source_language, "en");
        assert_eq!(format.version, "1.0");
        let hello = format.get("hello").unwrap();
        assert_eq!(hello.localizations.len(), 2);
        assert_eq!(hello.value("fr"), Some("Bonjour"));
        assert_eq!(hello.value("de"), Some("Hallo"));
        assert_eq!(hello.value("en"), None);
        assert_eq!(hello.comment.as_deref(), Some("Greeting"));
    }

    #[test]
    fn test_source_rows_create_empty_items() {
        let sheet = Sheet::new(
            "Main",
            vec![
                column("en", &[("untranslated", "", ""), ("// note", "Header", "")]),
                column("fr", &[("untranslated", "", ""), ("// note", "Entête", "")]),
            ],
        );
        let format = Format::from_sheets(&[sheet]).unwrap();
        assert_eq!(format.strings.len(), 2);
        assert_eq!(format.get("untranslated"), Some(&Item::default()));
        assert!(format.get("// note").unwrap().localizations.is_empty());
    }

    #[test]
    fn test_comment_marker_in_key_or_value_is_skipped() {
        let sheet = Sheet::new(
            "Main",
            vec![
                column("en", &[("a", "A", ""), ("b", "B", "")]),
                column("ja", &[("a", "// pending", ""), ("b", "ビー", "")]),
            ],
        );
        let format = Format::from_sheets(&[sheet]).unwrap();
        assert!(format.get("a").unwrap().localizations.is_empty());
        assert_eq!(format.get("b").unwrap().value("ja"), Some("ビー"));
    }

    #[test]
    fn test_unknown_key_is_a_consistency_fault() {
        let sheet = Sheet::new(
            "Main",
            vec![
                column("en", &[("known", "Known", "")]),
                column("fr", &[("stray", "Égaré", "")]),
            ],
        );
        let err = Format::from_sheets(&[sheet]).unwrap_err();
        match err {
            Error::ConsistencyFault { key, language_code } => {
                assert_eq!(key, "stray");
                assert_eq!(language_code, "fr");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_last_sheet_source_language_wins() {
        let first = Sheet::new("First", vec![column("en", &[("a", "A", "")])]);
        let second = Sheet::new("Second", vec![column("es", &[("b", "B", "")])]);
        let format = Format::from_sheets(&[first, second]).unwrap();
        assert_eq!(format.source_language, "es");
        assert_eq!(format.strings.len(), 2);
    }

    #[test]
    fn test_no_sheets_yields_empty_catalog() {
        let format = Format::from_sheets(&[]).unwrap();
        assert_eq!(format, Format::default());
        let json: serde_json::Value = serde_json::from_str(&format.render().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"sourceLanguage": "", "strings": {}, "version": "1.0"})
        );
    }

    #[test]
    fn test_json_shape() {
        let sheet = Sheet::new(
            "Main",
            vec![
                column("en", &[("welcome", "Welcome", "Shown on launch"), ("bye", "Bye", "")]),
                column("fr", &[("welcome", "Bienvenue", "Shown on launch"), ("bye", "", "")]),
            ],
        );
        let rendered = Format::from_sheets(&[sheet]).unwrap().render().unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sourceLanguage": "en",
                "strings": {
                    "bye": {},
                    "welcome": {
                        "localizations": {
                            "fr": {"stringUnit": {"state": "translated", "value": "Bienvenue"}}
                        },
                        "comment": "Shown on launch"
                    }
                },
                "version": "1.0"
            })
        );
        // Field order follows the catalog layout.
        let source = rendered.find("sourceLanguage").unwrap();
        let strings = rendered.find("\"strings\"").unwrap();
        let version = rendered.find("\"version\"").unwrap();
        assert!(source < strings && strings < version);
    }

    #[test]
    fn test_read_back_emitted_catalog() {
        let sheet = Sheet::new(
            "Main",
            vec![
                column("en", &[("a", "A", "note"), ("b", "B", "")]),
                column("pt", &[("a", "Á", "note"), ("b", "Bê", "")]),
            ],
        );
        let format = Format::from_sheets(&[sheet]).unwrap();
        let reparsed = Format::from_str(&format.render().unwrap()).unwrap();
        assert_eq!(format, reparsed);
    }
}
