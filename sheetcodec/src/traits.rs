//! Traits shared by every catalog format.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::{error::Error, types::Sheet};

/// Builds a platform catalog from parsed sheets and writes it out.
///
/// # Example
///
/// ```rust
/// use sheetcodec::{formats::AndroidXmlFormat, traits::CatalogSerializer, LocalizedColumn, LocalizedString, Sheet};
///
/// let sheet = Sheet::new(
///     "Main",
///     vec![LocalizedColumn::new("English", "en", "English", vec![
///         LocalizedString::new("hello", "Hello", ""),
///     ])],
/// );
/// let xml = AndroidXmlFormat::from_sheets(&[sheet])?.render()?;
/// assert!(xml.contains(r#"<string name="hello">Hello</string>"#));
/// # Ok::<(), sheetcodec::Error>(())
/// ```
pub trait CatalogSerializer {
    /// Merges every sheet, in order, into one catalog.
    fn from_sheets(sheets: &[Sheet]) -> Result<Self, Error>
    where
        Self: Sized;

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Render the whole catalog into a UTF-8 string.
    fn render(&self) -> Result<String, Error> {
        let mut out = Vec::new();
        self.to_writer(&mut out)?;
        String::from_utf8(out).map_err(|e| Error::InvalidCatalog(e.to_string()))
    }
}

/// Reads a previously emitted catalog back into memory.
pub trait CatalogReader {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }
}
