//! Grid sources: where raw worksheets come from.
//!
//! The core never cares how grids are obtained. [`MemorySource`] serves
//! fixtures, [`DelimitedSource`] reads CSV/TSV exports of a spreadsheet
//! (one file per worksheet).

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use crate::{
    error::Error,
    grid::{Grid, RawSheet},
};

/// Supplies every worksheet of one translation table, in sheet order.
pub trait GridSource {
    fn fetch_sheets(&self) -> Result<Vec<RawSheet>, Error>;
}

impl<T: GridSource + ?Sized> GridSource for &T {
    fn fetch_sheets(&self) -> Result<Vec<RawSheet>, Error> {
        (**self).fetch_sheets()
    }
}

/// Serves sheets that are already in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: Vec<RawSheet>,
}

impl MemorySource {
    pub fn new(sheets: Vec<RawSheet>) -> Self {
        Self { sheets }
    }

    pub fn with_sheet(mut self, sheet: RawSheet) -> Self {
        self.sheets.push(sheet);
        self
    }
}

impl GridSource for MemorySource {
    fn fetch_sheets(&self) -> Result<Vec<RawSheet>, Error> {
        Ok(self.sheets.clone())
    }
}

/// Reads worksheets exported as `.csv` or `.tsv` files.
///
/// Each file is one sheet named after its file stem. A directory contributes
/// every CSV/TSV file directly inside it, ordered by file name. Files are
/// decoded from UTF-8 or, when a byte-order mark says so, UTF-16.
#[derive(Debug, Clone, Default)]
pub struct DelimitedSource {
    paths: Vec<PathBuf>,
}

impl DelimitedSource {
    pub fn new<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Self {
        Self {
            paths: paths
                .into_iter()
                .map(|path| path.as_ref().to_path_buf())
                .collect(),
        }
    }

    /// Expands directories into the sheet files they hold.
    pub fn sheet_files(&self) -> Result<Vec<PathBuf>, Error> {
        let mut files = Vec::new();
        for path in &self.paths {
            if fs::metadata(path)?.is_dir() {
                let mut entries = Vec::new();
                for entry in fs::read_dir(path)? {
                    let entry_path = entry?.path();
                    if entry_path.is_file() && delimiter_for(&entry_path).is_some() {
                        entries.push(entry_path);
                    }
                }
                entries.sort();
                files.extend(entries);
            } else {
                files.push(path.clone());
            }
        }
        Ok(files)
    }
}

impl GridSource for DelimitedSource {
    fn fetch_sheets(&self) -> Result<Vec<RawSheet>, Error> {
        let files = self.sheet_files()?;
        let mut sheets = Vec::with_capacity(files.len());
        for path in files {
            let name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            let rows = read_grid(&path)?;
            tracing::debug!("Read {} row(s) from {}", rows.len(), path.display());
            sheets.push(RawSheet::new(name, rows));
        }
        Ok(sheets)
    }
}

fn delimiter_for(path: &Path) -> Option<u8> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "csv" => Some(b','),
        "tsv" => Some(b'\t'),
        _ => None,
    }
}

/// Reads one delimited file into a grid. Rows keep their own length.
pub fn read_grid(path: &Path) -> Result<Grid, Error> {
    let file = File::open(path)?;
    let decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .bom_override(true)
        .build(file);

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter_for(path).unwrap_or(b','))
        .from_reader(decoder);

    let mut rows = Grid::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
