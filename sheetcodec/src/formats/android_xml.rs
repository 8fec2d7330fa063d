//! Android string resources (`strings.xml`) with locale-qualified items.
//!
//! The source language of each sheet becomes the text of a top-level
//! `<string name="...">`; every other language is attached to it as an
//! `<item qualifier="locale/<code>">` child:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <resources>
//!     <string name="welcome">Welcome
//!         <item qualifier="locale/fr">Bienvenue</item>
//!     </string>
//! </resources>
//! ```

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use serde::Serialize;
use std::{
    collections::HashMap,
    io::{BufRead, Write},
};

use crate::{
    error::Error,
    traits::{CatalogReader, CatalogSerializer},
    types::Sheet,
};

const QUALIFIER_PREFIX: &str = "locale/";
const INDENT: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Format {
    pub strings: Vec<StringResource>,
}

impl Format {
    pub fn find(&self, name: &str) -> Option<&StringResource> {
        self.strings.iter().find(|sr| sr.name == name)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StringResource {
    pub name: String,
    pub value: String,
    pub translations: Vec<LocaleItem>,
}

impl StringResource {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            translations: Vec::new(),
        }
    }

    /// Translated text for a language code, if one was attached.
    pub fn translation(&self, language_code: &str) -> Option<&str> {
        self.translations
            .iter()
            .find(|item| item.language_code() == Some(language_code))
            .map(|item| item.value.as_str())
    }

    /// Adds a translation, replacing an earlier one with the same qualifier.
    fn upsert(&mut self, item: LocaleItem) {
        match self
            .translations
            .iter_mut()
            .find(|existing| existing.qualifier == item.qualifier)
        {
            Some(existing) => existing.value = item.value,
            None => self.translations.push(item),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocaleItem {
    pub qualifier: String,
    pub value: String,
}

impl LocaleItem {
    pub fn new(language_code: &str, value: impl Into<String>) -> Self {
        Self {
            qualifier: format!("{}{}", QUALIFIER_PREFIX, language_code),
            value: value.into(),
        }
    }

    pub fn language_code(&self) -> Option<&str> {
        self.qualifier.strip_prefix(QUALIFIER_PREFIX)
    }
}

impl CatalogSerializer for Format {
    /// Source rows with an empty key are dropped along with `//` keys, so
    /// padding rows past the end of the key list never produce a nameless
    /// `<string>`.
    fn from_sheets(sheets: &[Sheet]) -> Result<Self, Error> {
        let mut strings = Vec::<StringResource>::new();
        // Key -> position in `strings`; all sheets share one namespace.
        let mut positions = HashMap::<String, usize>::new();

        for sheet in sheets {
            let Some(source) = sheet.source_column() else {
                continue;
            };

            for string in source.strings() {
                if !string.has_key() || string.is_comment_key() {
                    continue;
                }
                match positions.get(string.key()) {
                    Some(&position) => strings[position].value = string.value().to_string(),
                    None => {
                        positions.insert(string.key().to_string(), strings.len());
                        strings.push(StringResource::new(string.key(), string.value()));
                    }
                }
            }

            for column in sheet.translation_columns() {
                for string in column.strings() {
                    if !string.is_translation() {
                        continue;
                    }
                    let position = *positions.entry(string.key().to_string()).or_insert_with(|| {
                        tracing::debug!(
                            "Key {} first seen in column {} of sheet {}",
                            string.key(),
                            column.language_code(),
                            sheet.name()
                        );
                        strings.push(StringResource::new(string.key(), ""));
                        strings.len() - 1
                    });
                    strings[position].upsert(LocaleItem::new(column.language_code(), string.value()));
                }
            }
        }

        Ok(Format { strings })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new_with_indent(&mut writer, b' ', INDENT);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        xml_writer.write_event(Event::Start(BytesStart::new("resources")))?;

        let child_indent = format!("\n{}", " ".repeat(INDENT * 2));
        for sr in &self.strings {
            let mut elem = BytesStart::new("string");
            elem.push_attribute(("name", sr.name.as_str()));

            xml_writer.write_event(Event::Start(elem))?;
            xml_writer.write_event(Event::Text(BytesText::new(&sr.value)))?;
            for item in &sr.translations {
                xml_writer.write_event(Event::Text(BytesText::new(&child_indent)))?;
                let mut child = BytesStart::new("item");
                child.push_attribute(("qualifier", item.qualifier.as_str()));
                xml_writer.write_event(Event::Start(child))?;
                xml_writer.write_event(Event::Text(BytesText::new(&item.value)))?;
                xml_writer.write_event(Event::End(BytesEnd::new("item")))?;
            }
            xml_writer.write_event(Event::End(BytesEnd::new("string")))?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new("resources")))?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

impl CatalogReader for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut strings = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(ref e) if e.name().as_ref() == b"string" => {
                    let name = required_attribute(e, b"name", "string")?;
                    strings.push(parse_string_resource(name, &mut xml_reader)?);
                }
                Event::Empty(ref e) if e.name().as_ref() == b"string" => {
                    let name = required_attribute(e, b"name", "string")?;
                    strings.push(StringResource::new(name, ""));
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(Format { strings })
    }
}

fn required_attribute(e: &BytesStart, key: &[u8], tag: &str) -> Result<String, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::InvalidCatalog(e.to_string()))?;
        if attr.key.as_ref() == key {
            return Ok(attr.unescape_value()?.to_string());
        }
    }
    Err(Error::InvalidCatalog(format!(
        "{} tag missing '{}'",
        tag,
        String::from_utf8_lossy(key)
    )))
}

fn parse_string_resource<R: BufRead>(
    name: String,
    xml_reader: &mut Reader<R>,
) -> Result<StringResource, Error> {
    let mut resource = StringResource::new(name, "");
    let mut buf = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Text(e) => resource.value.push_str(&e.unescape()?),
            Event::Start(ref e) if e.name().as_ref() == b"item" => {
                let qualifier = required_attribute(e, b"qualifier", "item")?;
                let value = read_item_text(xml_reader)?;
                resource.translations.push(LocaleItem { qualifier, value });
            }
            Event::Empty(ref e) if e.name().as_ref() == b"item" => {
                let qualifier = required_attribute(e, b"qualifier", "item")?;
                resource.translations.push(LocaleItem {
                    qualifier,
                    value: String::new(),
                });
            }
            Event::End(ref e) if e.name().as_ref() == b"string" => break,
            Event::Eof => {
                return Err(Error::InvalidCatalog(format!(
                    "unexpected EOF inside string '{}'",
                    resource.name
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(resource)
}

fn read_item_text<R: BufRead>(xml_reader: &mut Reader<R>) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut value = String::new();
    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Text(e) => value.push_str(&e.unescape()?),
            Event::End(_) => break,
            Event::Eof => return Err(Error::InvalidCatalog("unexpected EOF inside item".into())),
            _ => {}
        }
        buf.clear();
    }
    Ok(value)
}
