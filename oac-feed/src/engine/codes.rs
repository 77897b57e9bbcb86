//! Cell and code parsing
//!
//! A code is the join key linking a row in one sheet to a row in another.
//! Cells may hold several codes separated by commas.

/// Split a raw cell into trimmed, non-empty codes
///
/// Left-to-right order is preserved and duplicates are retained.
pub fn parse_codes(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

/// First code of a cell, if any
pub fn first_code(cell: &str) -> Option<String> {
    cell.split(',')
        .map(str::trim)
        .find(|code| !code.is_empty())
        .map(str::to_string)
}

/// True when a value holds nothing but separator punctuation and whitespace
pub fn is_blank_value(value: &str) -> bool {
    value.chars().all(|c| c == ',' || c.is_whitespace())
}
