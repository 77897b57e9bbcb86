//! RPDE feed envelope types
//!
//! Shared shape of the published feed pages. The payload type is generic so
//! the envelope does not depend on any particular OpenActive data model.

use serde::{Deserialize, Serialize};

/// License every published page carries
pub const LICENSE_URL: &str = "https://creativecommons.org/licenses/by/4.0/";

/// JSON-LD context for OpenActive items
pub const OPENACTIVE_CONTEXT: [&str; 2] = ["https://openactive.io/", "https://openactive.io/ns-beta"];

/// Path of the terminal (always empty) page
pub const LAST_PAGE_PATH: &str = "/last";

// ========================================
// Envelope Types
// ========================================

/// One page of the feed
///
/// # Examples
///
/// ```
/// use oac_common::feed::FeedPage;
///
/// let page: FeedPage<serde_json::Value> = FeedPage::last("https://clubs.example.org");
/// assert_eq!(page.next, "https://clubs.example.org/last");
/// assert!(page.items.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPage<T> {
    /// URL of the next page (static placeholder; pagination is not implemented)
    pub next: String,
    /// Data license URL
    pub license: String,
    /// Items in feed order
    pub items: Vec<T>,
}

impl<T> FeedPage<T> {
    /// Page whose `next` link points at the terminal page under `base_url`
    pub fn new(base_url: &str, items: Vec<T>) -> Self {
        Self {
            next: format!("{}{}", base_url, LAST_PAGE_PATH),
            license: LICENSE_URL.to_string(),
            items,
        }
    }

    /// Terminal page: no items
    pub fn last(base_url: &str) -> Self {
        Self::new(base_url, Vec::new())
    }
}

/// State of a feed item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Updated,
    Deleted,
}

/// One emitted feed item wrapping a schema-tagged document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem<T> {
    pub id: String,
    pub kind: String,
    pub state: ItemState,
    /// Unix epoch milliseconds at assembly time
    pub modified: i64,
    pub data: T,
}

// ========================================
// Tests
// ========================================
