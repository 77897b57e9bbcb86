//! Sheet sources
//!
//! The engine only needs "fetch sheet S of spreadsheet P as a grid of
//! string cells". [`SheetSource`] is that seam; [`GoogleSheetsClient`]
//! reads the Google Sheets API and [`InMemorySheets`] serves fixed grids.

pub mod google;
pub mod memory;

pub use google::{Credentials, GoogleSheetsClient};
pub use memory::InMemorySheets;

use serde_json::Value;
use thiserror::Error;

/// Rectangular-ish grid of cells; rows may be ragged
pub type Grid = Vec<Vec<String>>;

/// Sheet fetch errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),

    #[error("Sheet not found: {spreadsheet_id}/{sheet}")]
    SheetNotFound { spreadsheet_id: String, sheet: String },

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Source of sheet grids
#[async_trait::async_trait]
pub trait SheetSource: Send + Sync {
    /// Fetch one named sheet of one spreadsheet
    async fn fetch_sheet(&self, spreadsheet_id: &str, sheet_name: &str) -> Result<Grid, FetchError>;
}

/// String form of a JSON cell
///
/// Numeric and boolean cells keep their JSON text; null is empty.
pub fn cell_to_string(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Convert JSON rows into a grid
pub fn grid_from_values(rows: &[Vec<Value>]) -> Grid {
    rows.iter()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect()
}
