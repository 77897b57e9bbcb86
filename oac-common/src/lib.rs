//! # OpenActive Clubs Common Library
//!
//! Shared code for the OpenActive clubs feed services including:
//! - Error types
//! - Configuration loading (TOML bootstrap + compiled defaults)
//! - Spreadsheet identifier list loading
//! - RPDE feed envelope types

pub mod config;
pub mod error;
pub mod feed;
pub mod spreadsheet_ids;

pub use error::{Error, Result};
pub use spreadsheet_ids::SpreadsheetIds;
