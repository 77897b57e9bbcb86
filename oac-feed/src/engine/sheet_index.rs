//! Sheet index
//!
//! Wraps one fetched sheet: header row, per-row join code, and the data
//! rows with the code column removed. Built once per spreadsheet per sheet
//! and immutable afterwards.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::warn;

use super::codes::first_code;
use super::record::{materialize, Record};
use crate::sheets::Grid;

/// Where field names, codes and data sit within a sheet
///
/// Row 0 always carries the field names. Data begins at `header_rows`.
/// Each data row's join code is the first code in `code_column`; field
/// values are the cells to the right of it. Columns left of the code
/// column are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub header_rows: usize,
    pub code_column: usize,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            header_rows: 3,
            code_column: 0,
        }
    }
}

impl SheetLayout {
    pub fn new(header_rows: usize, code_column: usize) -> Self {
        Self {
            header_rows,
            code_column,
        }
    }

    fn values_of<'a>(&self, row: &'a [String]) -> &'a [String] {
        self.code_column
            .checked_add(1)
            .and_then(|start| row.get(start..))
            .unwrap_or(&[])
    }
}

/// Indexed view over one sheet
#[derive(Debug, Clone, Default)]
pub struct SheetIndex {
    name: String,
    headers: Vec<String>,
    codes: Vec<Option<String>>,
    rows: Vec<Vec<String>>,
    /// First row carrying each code
    positions: HashMap<String, usize>,
}

impl SheetIndex {
    /// Index a fetched grid
    ///
    /// Codes repeated across rows are reported as a data-quality warning;
    /// lookups resolve to the first such row.
    pub fn from_grid(name: &str, grid: &Grid, layout: SheetLayout) -> Self {
        let headers = grid
            .first()
            .map(|row| layout.values_of(row).to_vec())
            .unwrap_or_default();

        let data = grid.get(layout.header_rows..).unwrap_or(&[]);

        let mut codes = Vec::with_capacity(data.len());
        let mut rows = Vec::with_capacity(data.len());
        let mut positions = HashMap::new();
        let mut occurrences: IndexMap<String, usize> = IndexMap::new();

        for (i, row) in data.iter().enumerate() {
            let code = row.get(layout.code_column).and_then(|cell| first_code(cell));
            if let Some(code) = &code {
                positions.entry(code.clone()).or_insert(i);
                *occurrences.entry(code.clone()).or_insert(0) += 1;
            }
            codes.push(code);
            rows.push(layout.values_of(row).to_vec());
        }

        for (code, count) in occurrences.iter().filter(|(_, count)| **count > 1) {
            warn!(
                sheet = %name,
                code = %code,
                count = count,
                "Duplicate code in sheet, first row wins"
            );
        }

        Self {
            name: name.to_string(),
            headers,
            codes,
            rows,
            positions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first row whose code equals `code`
    pub fn find(&self, code: &str) -> Option<usize> {
        self.positions.get(code).copied()
    }

    /// Join code of a row
    pub fn code(&self, row: usize) -> Option<&str> {
        self.codes.get(row).and_then(|c| c.as_deref())
    }

    /// Raw values of a row, aligned with `headers`
    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Materialize a row against the header row
    pub fn record(&self, row: usize) -> Option<Record> {
        self.row(row)
            .and_then(|values| materialize(&self.headers, values))
    }

    /// Materialize the row a code points at
    pub fn lookup(&self, code: &str) -> Option<Record> {
        self.find(code).and_then(|row| self.record(row))
    }

    /// Iterate row indices in sheet order
    pub fn row_indices(&self) -> std::ops::Range<usize> {
        0..self.rows.len()
    }
}
