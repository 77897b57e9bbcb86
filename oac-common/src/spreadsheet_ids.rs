//! Spreadsheet identifier list
//!
//! The list is loaded once at startup and handed to the feed assembler as
//! an immutable value. Its order defines both the iteration order and the
//! scope of spreadsheets aggregated into one feed.

use crate::{Error, Result};
use std::path::Path;
use tracing::{info, warn};

/// Ordered, immutable list of spreadsheet identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpreadsheetIds(Vec<String>);

impl SpreadsheetIds {
    pub fn new(ids: Vec<String>) -> Self {
        Self(ids)
    }

    /// Parse line-delimited identifiers
    ///
    /// Each line is trimmed of whitespace and surrounding commas; blank
    /// lines are skipped. Duplicates are kept.
    pub fn parse(content: &str) -> Self {
        Self(
            content
                .lines()
                .map(|line| line.trim().trim_matches(',').trim())
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Load identifiers from a file
    ///
    /// A missing or unreadable file is fatal: no club data can be served
    /// until it is corrected.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Cannot read spreadsheet id list {}: {}",
                path.display(),
                e
            ))
        })?;

        let ids = Self::parse(&content);
        if ids.is_empty() {
            warn!("Spreadsheet id list {} is empty", path.display());
        } else {
            info!("Loaded {} spreadsheet id(s) from {}", ids.len(), path.display());
        }
        Ok(ids)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
