//! Sub-entity resolution
//!
//! Resolves codes against another sheet's index and builds typed
//! sub-entities (images, addresses, amenity features) from the matched
//! rows. Codes that do not resolve, or resolve to a blank row, are skipped.

use tracing::debug;

use super::schema::SubEntity;
use super::sheet_index::SheetIndex;

/// Output mode of a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// First resolved item, for single-valued relations (logo, address)
    Single,
    /// Every resolved item in code order, for list-valued relations
    Multiple,
}

/// Result of a resolution, shaped by [`ResolveMode`]
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<T> {
    Single(T),
    Multiple(Vec<T>),
}

impl<T> Resolved<T> {
    pub fn into_single(self) -> Option<T> {
        match self {
            Resolved::Single(item) => Some(item),
            Resolved::Multiple(items) => items.into_iter().next(),
        }
    }

    pub fn into_multiple(self) -> Vec<T> {
        match self {
            Resolved::Single(item) => vec![item],
            Resolved::Multiple(items) => items,
        }
    }
}

/// Resolve `codes` against `index` as sub-entities of type `T`
///
/// Returns `None` when nothing resolved. Duplicate codes resolve once per
/// occurrence.
pub fn resolve<T: SubEntity>(
    index: &SheetIndex,
    codes: &[String],
    mode: ResolveMode,
) -> Option<Resolved<T>> {
    let mut resolved = codes.iter().filter_map(|code| {
        let record = index.lookup(code);
        if record.is_none() {
            debug!(
                sheet = %index.name(),
                code = %code,
                schema_type = ?T::SCHEMA_TYPE,
                "Unresolved sub-entity code skipped"
            );
        }
        record.map(T::from_record)
    });

    match mode {
        ResolveMode::Single => resolved.next().map(Resolved::Single),
        ResolveMode::Multiple => {
            let items: Vec<T> = resolved.collect();
            if items.is_empty() {
                None
            } else {
                Some(Resolved::Multiple(items))
            }
        }
    }
}

/// Resolve in [`ResolveMode::Single`]
pub fn resolve_single<T: SubEntity>(index: &SheetIndex, codes: &[String]) -> Option<T> {
    resolve(index, codes, ResolveMode::Single).and_then(Resolved::into_single)
}

/// Resolve in [`ResolveMode::Multiple`]
pub fn resolve_multiple<T: SubEntity>(index: &SheetIndex, codes: &[String]) -> Option<Vec<T>> {
    resolve(index, codes, ResolveMode::Multiple).map(Resolved::into_multiple)
}
