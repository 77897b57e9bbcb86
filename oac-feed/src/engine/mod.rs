//! Row-joining and shape-normalization engine
//!
//! Turns flat spreadsheet rows into nested OpenActive records:
//! - `codes`: cell → join codes
//! - `record`: header row + data row → field map
//! - `sheet_index`: code → row lookup over one sheet
//! - `resolver`: codes → typed sub-entities
//! - `organizer` / `location`: row → `Organization` / `Place`
//! - `assembler`: spreadsheets → feed items

pub mod assembler;
pub mod codes;
pub mod fields;
pub mod location;
pub mod organizer;
pub mod record;
pub mod resolver;
pub mod schema;
pub mod sheet_index;
pub mod sheet_set;

pub use assembler::{build_items, ClubItem, FeedAssembler};
pub use sheet_index::{SheetIndex, SheetLayout};
pub use sheet_set::SheetSet;
