//! Intermediate model shared by the grid parser and every catalog serializer.
//! The parser builds these; serializers only read them.

use serde::Serialize;
use unic_langid::LanguageIdentifier;

/// Prefix that marks a key or value as an author note rather than data.
pub const COMMENT_MARKER: &str = "//";

/// One translation row of one language column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LocalizedString {
    key: String,
    value: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    comment: String,
}

impl LocalizedString {
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            comment: comment.into(),
        }
    }

    /// The string key. Empty when the row has no stable identifier.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Translator note shared by every language of this row, empty if absent.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn has_key(&self) -> bool {
        !self.key.is_empty()
    }

    /// Whether the key starts with [`COMMENT_MARKER`].
    pub fn is_comment_key(&self) -> bool {
        self.key.starts_with(COMMENT_MARKER)
    }

    /// Whether the value starts with [`COMMENT_MARKER`].
    pub fn is_comment_value(&self) -> bool {
        self.value.starts_with(COMMENT_MARKER)
    }

    /// A row a non-source column may contribute to a catalog: both key and
    /// value are present and neither is marked as a comment.
    pub fn is_translation(&self) -> bool {
        !self.key.is_empty()
            && !self.value.is_empty()
            && !self.is_comment_key()
            && !self.is_comment_value()
    }
}

/// All rows of one language within a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LocalizedColumn {
    language: String,
    language_code: String,
    language_name: String,
    strings: Vec<LocalizedString>,
}

impl LocalizedColumn {
    pub fn new(
        language: impl Into<String>,
        language_code: impl Into<String>,
        language_name: impl Into<String>,
        strings: Vec<LocalizedString>,
    ) -> Self {
        Self {
            language: language.into(),
            language_code: language_code.into(),
            language_name: language_name.into(),
            strings,
        }
    }

    /// Display name of the language (e.g. "English").
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Short code used to qualify catalog entries (e.g. "en").
    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    /// Long display name (e.g. "English (US)").
    pub fn language_name(&self) -> &str {
        &self.language_name
    }

    pub fn strings(&self) -> &[LocalizedString] {
        &self.strings
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Parses the language code as a BCP 47 identifier, if it is one.
    pub fn language_identifier(&self) -> Option<LanguageIdentifier> {
        self.language_code.parse().ok()
    }
}

/// One worksheet. The first column is the source language.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Sheet {
    name: String,
    columns: Vec<LocalizedColumn>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, columns: Vec<LocalizedColumn>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[LocalizedColumn] {
        &self.columns
    }

    /// The source (default) language column.
    pub fn source_column(&self) -> Option<&LocalizedColumn> {
        self.columns.first()
    }

    /// Every column after the source language.
    pub fn translation_columns(&self) -> &[LocalizedColumn] {
        self.columns.get(1..).unwrap_or_default()
    }

    pub fn find_column(&self, language_code: &str) -> Option<&LocalizedColumn> {
        self.columns
            .iter()
            .find(|column| column.language_code == language_code)
    }

    /// Number of data rows, shared by every column of the sheet.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, LocalizedColumn::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(code: &str, rows: &[(&str, &str)]) -> LocalizedColumn {
        LocalizedColumn::new(
            code.to_uppercase(),
            code,
            code,
            rows.iter()
                .map(|(key, value)| LocalizedString::new(*key, *value, ""))
                .collect(),
        )
    }

    #[test]
    fn test_translation_row_rules() {
        assert!(LocalizedString::new("hello", "Hello", "").is_translation());
        assert!(!LocalizedString::new("", "Hello", "").is_translation());
        assert!(!LocalizedString::new("hello", "", "").is_translation());
        assert!(!LocalizedString::new("// section", "Hello", "").is_translation());
        assert!(!LocalizedString::new("hello", "// todo", "").is_translation());
        // A single slash is ordinary text.
        assert!(LocalizedString::new("/path", "/Hello", "").is_translation());
    }

    #[test]
    fn test_comment_marker_checks() {
        let row = LocalizedString::new("//header", "value", "note");
        assert!(row.is_comment_key());
        assert!(!row.is_comment_value());
        assert_eq!(row.comment(), "note");
    }

    #[test]
    fn test_sheet_source_and_translation_columns() {
        let sheet = Sheet::new(
            "Main",
            vec![
                column("en", &[("a", "A"), ("b", "B")]),
                column("fr", &[("a", "Á"), ("b", "")]),
                column("de", &[("a", "Ä"), ("b", "Bé")]),
            ],
        );
        assert_eq!(sheet.source_column().map(|c| c.language_code()), Some("en"));
        let codes: Vec<_> = sheet
            .translation_columns()
            .iter()
            .map(|c| c.language_code())
            .collect();
        assert_eq!(codes, vec!["fr", "de"]);
        assert_eq!(sheet.row_count(), 2);
        assert!(sheet.find_column("de").is_some());
        assert!(sheet.find_column("es").is_none());
    }

    #[test]
    fn test_empty_sheet_has_no_translation_columns() {
        let sheet = Sheet::new("Empty", Vec::new());
        assert!(sheet.source_column().is_none());
        assert!(sheet.translation_columns().is_empty());
        assert_eq!(sheet.row_count(), 0);
    }

    #[test]
    fn test_language_identifier() {
        let en = column("en-US", &[]);
        let id = en.language_identifier().expect("valid identifier");
        assert_eq!(id.language.as_str(), "en");

        let free_form = column("not a code", &[]);
        assert!(free_form.language_identifier().is_none());
    }

    #[test]
    fn test_serialize_omits_empty_comment() {
        let json = serde_json::to_string(&LocalizedString::new("k", "v", "")).unwrap();
        assert_eq!(json, r#"{"key":"k","value":"v"}"#);
        let json = serde_json::to_string(&LocalizedString::new("k", "v", "c")).unwrap();
        assert_eq!(json, r#"{"key":"k","value":"v","comment":"c"}"#);
    }
}
