//! In-memory sheet source
//!
//! Serves fixed grids keyed by spreadsheet id and sheet name. Used by the
//! test suites and by `--fixtures` for serving a feed without network
//! access.
//!
//! Fixture file shape:
//!
//! ```json
//! { "<spreadsheet id>": { "clubs": [["code", "name"], ...], "organizers": [...] } }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use super::{grid_from_values, FetchError, Grid, SheetSource};

/// Map-backed [`SheetSource`]
#[derive(Debug, Clone, Default)]
pub struct InMemorySheets {
    sheets: HashMap<(String, String), Grid>,
}

impl InMemorySheets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one sheet
    pub fn insert(&mut self, spreadsheet_id: &str, sheet_name: &str, grid: Grid) {
        self.sheets
            .insert((spreadsheet_id.to_string(), sheet_name.to_string()), grid);
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_sheet(mut self, spreadsheet_id: &str, sheet_name: &str, grid: Grid) -> Self {
        self.insert(spreadsheet_id, sheet_name, grid);
        self
    }

    /// Parse a fixture document
    pub fn from_json(document: &Value) -> Result<Self, FetchError> {
        let spreadsheets = document
            .as_object()
            .ok_or_else(|| FetchError::Parse("fixture root must be an object".to_string()))?;

        let mut source = Self::new();
        for (spreadsheet_id, sheets) in spreadsheets {
            let sheets = sheets.as_object().ok_or_else(|| {
                FetchError::Parse(format!("spreadsheet {} must be an object", spreadsheet_id))
            })?;
            for (sheet_name, rows) in sheets {
                let rows: Vec<Vec<Value>> = serde_json::from_value(rows.clone()).map_err(|e| {
                    FetchError::Parse(format!("{}/{}: {}", spreadsheet_id, sheet_name, e))
                })?;
                source.insert(spreadsheet_id, sheet_name, grid_from_values(&rows));
            }
        }
        Ok(source)
    }

    /// Load a fixture file
    pub fn load(path: &Path) -> Result<Self, FetchError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FetchError::Parse(format!("{}: {}", path.display(), e)))?;
        let document: Value = serde_json::from_str(&content)
            .map_err(|e| FetchError::Parse(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&document)
    }

    /// Spreadsheet ids present, sorted
    pub fn spreadsheet_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sheets.keys().map(|(id, _)| id.clone()).collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

#[async_trait::async_trait]
impl SheetSource for InMemorySheets {
    async fn fetch_sheet(&self, spreadsheet_id: &str, sheet_name: &str) -> Result<Grid, FetchError> {
        if let Some(grid) = self
            .sheets
            .get(&(spreadsheet_id.to_string(), sheet_name.to_string()))
        {
            return Ok(grid.clone());
        }

        if self.sheets.keys().any(|(id, _)| id == spreadsheet_id) {
            Err(FetchError::SheetNotFound {
                spreadsheet_id: spreadsheet_id.to_string(),
                sheet: sheet_name.to_string(),
            })
        } else {
            Err(FetchError::SpreadsheetNotFound(spreadsheet_id.to_string()))
        }
    }
}
