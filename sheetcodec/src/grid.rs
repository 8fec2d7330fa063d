//! Grid parser: turns one raw worksheet into a [`Sheet`].
//!
//! The parser reads cells positionally according to a [`GridLayout`]. Row
//! vectors may be ragged; a missing cell reads as an empty string, and a
//! column ends at the last row that actually holds a cell for it.

use std::collections::HashMap;

use crate::{
    error::Error,
    layout::GridLayout,
    types::{LocalizedColumn, LocalizedString, Sheet},
};

pub type Row = Vec<String>;

/// Rows of string cells, top to bottom. Empty cells are empty strings.
pub type Grid = Vec<Row>;

/// One worksheet as delivered by a [`crate::source::GridSource`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawSheet {
    pub name: String,
    pub rows: Grid,
}

impl RawSheet {
    pub fn new(name: impl Into<String>, rows: Grid) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Builds a sheet from anything that yields rows of string-like cells.
    ///
    /// ```rust
    /// use sheetcodec::RawSheet;
    /// let sheet = RawSheet::from_rows("Main", [["", "English"], ["", "en"]]);
    /// assert_eq!(sheet.rows[1][1], "en");
    /// ```
    pub fn from_rows<R, C>(name: impl Into<String>, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            name: name.into(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parses raw grids into [`Sheet`]s using a [`GridLayout`].
#[derive(Debug, Clone, Default)]
pub struct GridParser {
    layout: GridLayout,
}

impl GridParser {
    pub fn new(layout: GridLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Parses one grid.
    ///
    /// Returns `Ok(None)` for a grid with no rows at all. Any other grid must
    /// have the header rows and columns the layout requires, otherwise an
    /// [`Error::Structural`] is returned.
    ///
    /// Every column of the returned sheet has the same number of strings, and
    /// string `i` of each column carries key `i` of the key source column.
    /// Rows past the end of the key list get an empty key.
    pub fn parse(&self, raw: &RawSheet) -> Result<Option<Sheet>, Error> {
        if raw.is_empty() {
            tracing::debug!("Skipping empty sheet {}", raw.name);
            return Ok(None);
        }

        let layout = &self.layout;
        layout.check_shape(&raw.name, &raw.rows)?;

        let grid = &raw.rows;
        let start = layout.data_start_row;
        let keys = data_cells(grid, layout.key_source_column_index, start);
        let comments = data_cells(grid, layout.comment_column_index, start);
        let language_columns = self.language_column_indices(grid);

        let row_count = language_columns
            .iter()
            .map(|&index| column_len(grid, index).saturating_sub(start))
            .chain(std::iter::once(keys.len()))
            .max()
            .unwrap_or(0);

        let columns: Vec<LocalizedColumn> = language_columns
            .into_iter()
            .map(|index| self.parse_column(grid, index, &keys, &comments, row_count))
            .collect();

        tracing::debug!(
            "Parsed sheet {}: {} language column(s), {} row(s)",
            raw.name,
            columns.len(),
            row_count
        );

        Ok(Some(Sheet::new(raw.name.clone(), columns)))
    }

    /// Parses every grid in order, dropping empty ones.
    pub fn parse_all(
        &self,
        raw_sheets: impl IntoIterator<Item = RawSheet>,
    ) -> Result<Vec<Sheet>, Error> {
        let mut sheets = Vec::new();
        let mut declared_in = HashMap::<String, String>::new();

        for raw in raw_sheets {
            let Some(sheet) = self.parse(&raw)? else {
                continue;
            };

            if let Some(source) = sheet.source_column() {
                for string in source.strings() {
                    if !string.has_key() || string.is_comment_key() {
                        continue;
                    }
                    match declared_in.get(string.key()) {
                        Some(previous) if previous != sheet.name() => {
                            tracing::warn!(
                                "Key {} from sheet {} redefines the one from sheet {}",
                                string.key(),
                                sheet.name(),
                                previous
                            );
                        }
                        Some(_) => {}
                        None => {
                            declared_in
                                .insert(string.key().to_string(), sheet.name().to_string());
                        }
                    }
                }
            }

            sheets.push(sheet);
        }

        Ok(sheets)
    }

    fn language_column_indices(&self, grid: &Grid) -> Vec<usize> {
        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        (self.layout.first_language_column_index..width)
            .filter(|&index| index != self.layout.comment_column_index)
            .collect()
    }

    fn parse_column(
        &self,
        grid: &Grid,
        index: usize,
        keys: &[&str],
        comments: &[&str],
        row_count: usize,
    ) -> LocalizedColumn {
        let layout = &self.layout;
        let strings = (0..row_count)
            .map(|row| {
                LocalizedString::new(
                    keys.get(row).copied().unwrap_or_default(),
                    cell(grid, layout.data_start_row + row, index),
                    comment_at(comments, row),
                )
            })
            .collect();

        LocalizedColumn::new(
            cell(grid, layout.language_row, index),
            cell(grid, layout.language_code_row, index),
            cell(grid, layout.language_name_row, index),
            strings,
        )
    }
}

fn cell(grid: &Grid, row: usize, column: usize) -> &str {
    grid.get(row)
        .and_then(|cells| cells.get(column))
        .map_or("", String::as_str)
}

/// Number of rows down to the last one holding a cell in `column`.
fn column_len(grid: &Grid, column: usize) -> usize {
    grid.iter()
        .rposition(|cells| cells.len() > column)
        .map_or(0, |last| last + 1)
}

fn data_cells(grid: &Grid, column: usize, start: usize) -> Vec<&str> {
    (start..column_len(grid, column))
        .map(|row| cell(grid, row, column))
        .collect()
}

/// The comment for data row `index`. The final slot of the comment column
/// is treated as absent, like any index past the end.
fn comment_at<'a>(comments: &[&'a str], index: usize) -> &'a str {
    if index + 1 >= comments.len() {
        return "";
    }
    comments[index]
}
