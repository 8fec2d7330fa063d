//! All supported catalog formats for sheetcodec.
//!
//! This module re-exports the main types for each format and provides
//! [`FormatType`] and [`Document`] for handling any of them generically.

pub mod android_xml;
pub mod string_catalog;

use std::{
    fmt::{Display, Formatter},
    io::Write,
    str::FromStr,
};

// Reexporting the formats for easier access
pub use android_xml::Format as AndroidXmlFormat;
pub use string_catalog::Format as StringCatalogFormat;

use crate::{error::Error, traits::CatalogSerializer, types::Sheet};

/// Every catalog format a run can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatType {
    /// Android `strings.xml` with locale-qualified items.
    AndroidXml,
    /// Apple string catalog JSON.
    StringCatalog,
}

impl FormatType {
    pub const ALL: [FormatType; 2] = [FormatType::AndroidXml, FormatType::StringCatalog];

    /// Default file name of the generated document.
    pub fn file_name(&self) -> &'static str {
        match self {
            FormatType::AndroidXml => "strings.xml",
            FormatType::StringCatalog => "Localization.json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            FormatType::AndroidXml => "application/xml",
            FormatType::StringCatalog => "application/json",
        }
    }

    /// Default folder path the document is stored under.
    pub fn destination(&self) -> Vec<String> {
        let platform = match self {
            FormatType::AndroidXml => "Android",
            FormatType::StringCatalog => "iOS",
        };
        vec!["Translations".to_string(), platform.to_string()]
    }

    /// Serializes sheets into a document of this format.
    pub fn serialize(&self, sheets: &[Sheet]) -> Result<Document, Error> {
        Ok(match self {
            FormatType::AndroidXml => Document::AndroidXml(AndroidXmlFormat::from_sheets(sheets)?),
            FormatType::StringCatalog => {
                Document::StringCatalog(StringCatalogFormat::from_sheets(sheets)?)
            }
        })
    }
}

/// Implements [`std::fmt::Display`] for [`FormatType`].
///
/// ```rust
/// use sheetcodec::formats::FormatType;
/// assert_eq!(FormatType::AndroidXml.to_string(), "android");
/// assert_eq!(FormatType::StringCatalog.to_string(), "ios");
/// ```
impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::AndroidXml => write!(f, "android"),
            FormatType::StringCatalog => write!(f, "ios"),
        }
    }
}

/// Accepts, case-insensitively:
/// - `"android"`, `"xml"` → [`FormatType::AndroidXml`]
/// - `"ios"`, `"apple"`, `"xcstrings"`, `"json"` → [`FormatType::StringCatalog`]
///
/// ```rust
/// use sheetcodec::formats::FormatType;
/// use std::str::FromStr;
/// assert_eq!(FormatType::from_str("Android").unwrap(), FormatType::AndroidXml);
/// assert_eq!(FormatType::from_str("xcstrings").unwrap(), FormatType::StringCatalog);
/// assert!(FormatType::from_str("po").is_err());
/// ```
impl FromStr for FormatType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], "");
        match normalized.as_str() {
            "android" | "androidxml" | "xml" => Ok(FormatType::AndroidXml),
            "ios" | "apple" | "xcstrings" | "stringcatalog" | "json" => {
                Ok(FormatType::StringCatalog)
            }
            _ => Err(Error::UnknownFormat(s.trim().to_string())),
        }
    }
}

/// A serialized catalog of any supported format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    AndroidXml(AndroidXmlFormat),
    StringCatalog(StringCatalogFormat),
}

impl Document {
    pub fn format_type(&self) -> FormatType {
        match self {
            Document::AndroidXml(_) => FormatType::AndroidXml,
            Document::StringCatalog(_) => FormatType::StringCatalog,
        }
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        match self {
            Document::AndroidXml(format) => format.to_writer(writer),
            Document::StringCatalog(format) => format.to_writer(writer),
        }
    }

    pub fn render(&self) -> Result<String, Error> {
        match self {
            Document::AndroidXml(format) => format.render(),
            Document::StringCatalog(format) => format.render(),
        }
    }
}
