//! Per-entity field tables
//!
//! Builders describe each special column as a [`FieldRule`]: the column
//! name plus the handler that stores it on the typed record. A single pass
//! over the materialized row strips blank cells, dispatches known columns
//! to their handler, and passes the rest through as extra properties.

use tracing::debug;

use super::codes::is_blank_value;
use super::record::Record;
use super::schema::{insert_extra, Extra, Organization, Place};
use super::sheet_set::SheetSet;

/// Handler for one named column
pub struct FieldRule<E: 'static> {
    pub name: &'static str,
    pub apply: fn(&mut E, String, &SheetSet),
}

/// Typed record that can carry pass-through columns
pub trait FieldTarget {
    fn extra_mut(&mut self) -> &mut Extra;
}

impl FieldTarget for Organization {
    fn extra_mut(&mut self) -> &mut Extra {
        &mut self.extra
    }
}

impl FieldTarget for Place {
    fn extra_mut(&mut self) -> &mut Extra {
        &mut self.extra
    }
}

/// Apply `rules` to every field of `record`
///
/// Cells holding only commas and whitespace are dropped before dispatch.
pub fn apply_fields<E: FieldTarget>(
    entity: &mut E,
    record: Record,
    rules: &[FieldRule<E>],
    sheets: &SheetSet,
) {
    for (key, value) in record {
        if is_blank_value(&value) {
            debug!(field = %key, "Blank field dropped");
            continue;
        }

        match rules.iter().find(|rule| rule.name == key) {
            Some(rule) => (rule.apply)(entity, value, sheets),
            None => insert_extra(entity.extra_mut(), key, value),
        }
    }
}
