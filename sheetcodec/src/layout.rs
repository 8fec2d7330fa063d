//! Positional convention of a translation grid.
//!
//! The default layout is the one spreadsheet authors use:
//!
//! | row | column 0 | column 1 (base language) | column 2.. |
//! |-----|----------|--------------------------|------------|
//! | 0   |          | English                  | French     |
//! | 1   |          | en                       | fr         |
//! | 2   |          | English (US)             | French     |
//! | 3-5 | reserved | reserved                 | reserved   |
//! | 6.. | comment  | key / base text          | text       |

use serde::{Deserialize, Serialize};

use crate::{error::Error, grid::Grid};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GridLayout {
    /// Column holding translator comments. Never a language column.
    pub comment_column_index: usize,
    /// Column whose data rows provide the keys for every language column.
    pub key_source_column_index: usize,
    /// First column holding a language. Every later column is one as well.
    pub first_language_column_index: usize,
    pub language_row: usize,
    pub language_code_row: usize,
    pub language_name_row: usize,
    /// Minimum number of rows a non-empty grid must have.
    pub header_row_count: usize,
    /// First row holding translation data.
    pub data_start_row: usize,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            comment_column_index: 0,
            key_source_column_index: 1,
            first_language_column_index: 1,
            language_row: 0,
            language_code_row: 1,
            language_name_row: 2,
            header_row_count: 3,
            data_start_row: 6,
        }
    }
}

impl GridLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comment_column(mut self, index: usize) -> Self {
        self.comment_column_index = index;
        self
    }

    pub fn with_key_source_column(mut self, index: usize) -> Self {
        self.key_source_column_index = index;
        self
    }

    pub fn with_first_language_column(mut self, index: usize) -> Self {
        self.first_language_column_index = index;
        self
    }

    pub fn with_header_row_count(mut self, count: usize) -> Self {
        self.header_row_count = count;
        self
    }

    pub fn with_data_start_row(mut self, row: usize) -> Self {
        self.data_start_row = row;
        self
    }

    /// Smallest column count a grid needs to yield one language column.
    pub fn min_columns(&self) -> usize {
        self.comment_column_index
            .max(self.key_source_column_index)
            .max(self.first_language_column_index)
            + 1
    }

    /// Checks a non-empty grid against the minimum shape this layout assumes.
    ///
    /// Row vectors may be ragged; width is the longest row.
    pub fn check_shape(&self, sheet: &str, grid: &Grid) -> Result<(), Error> {
        if grid.len() < self.header_row_count {
            return Err(Error::structural(
                sheet,
                format!(
                    "expected at least {} header rows, found {}",
                    self.header_row_count,
                    grid.len()
                ),
            ));
        }

        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        if width < self.min_columns() {
            return Err(Error::structural(
                sheet,
                format!(
                    "expected at least {} columns, found {}",
                    self.min_columns(),
                    width
                ),
            ));
        }

        Ok(())
    }
}
