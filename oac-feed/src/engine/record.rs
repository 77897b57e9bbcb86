//! Row materialization
//!
//! Pairs a header row with one data row. Spreadsheet rows commonly end
//! early, so `values` may be shorter than `headers`.

use indexmap::IndexMap;

/// Field name → non-empty value, in header order
pub type Record = IndexMap<String, String>;

/// Zip headers with values, dropping absent and empty values
///
/// Returns `None` when no field carries a value. Whitespace-only values are
/// kept here; the organizer and location builders strip those themselves.
pub fn materialize(headers: &[String], values: &[String]) -> Option<Record> {
    let record: Record = headers
        .iter()
        .zip(values.iter())
        .filter(|(_, value)| !value.is_empty())
        .map(|(header, value)| (header.clone(), value.clone()))
        .collect();

    if record.is_empty() {
        None
    } else {
        Some(record)
    }
}
