//! Feed assembly
//!
//! Top-level driver: for each spreadsheet, load the six sheets, walk the
//! club rows, resolve each club's organizer and locations, and emit one
//! feed item per surviving (club, location) pair.
//!
//! Every call is a full, stateless recomputation. Spreadsheets are
//! processed one after another; once a spreadsheet's sheets are fetched
//! all joining is synchronous and in memory.

use std::sync::Arc;

use oac_common::feed::{FeedItem, ItemState, OPENACTIVE_CONTEXT};
use oac_common::SpreadsheetIds;
use tracing::{debug, info};

use super::codes::{first_code, parse_codes};
use super::location::build_location;
use super::organizer::build_organizer;
use super::schema::{Club, SchemaType};
use super::sheet_index::SheetLayout;
use super::sheet_set::SheetSet;
use crate::sheets::{FetchError, SheetSource};

/// Item kind of every emitted feed item
pub const ITEM_KIND: &str = "Club";

/// Emitted feed item
pub type ClubItem = FeedItem<Club>;

/// Club sheet columns the assembler reads
const CLUB_ORGANIZER_FIELD: &str = "organizer";
const CLUB_LOCATION_FIELD: &str = "location";
const CLUB_NAME_FIELD: &str = "name";

/// Builds the feed across a fixed list of spreadsheets
pub struct FeedAssembler {
    source: Arc<dyn SheetSource>,
    spreadsheet_ids: SpreadsheetIds,
    layout: SheetLayout,
}

impl FeedAssembler {
    pub fn new(
        source: Arc<dyn SheetSource>,
        spreadsheet_ids: SpreadsheetIds,
        layout: SheetLayout,
    ) -> Self {
        Self {
            source,
            spreadsheet_ids,
            layout,
        }
    }

    pub fn spreadsheet_ids(&self) -> &SpreadsheetIds {
        &self.spreadsheet_ids
    }

    /// Assemble items for every configured spreadsheet
    ///
    /// `base_url` prefixes each item's `@id`. Any sheet fetch failure
    /// aborts the whole assembly; no partial feed is produced.
    pub async fn assemble(&self, base_url: &str) -> Result<Vec<ClubItem>, FetchError> {
        let modified = chrono::Utc::now().timestamp_millis();
        let mut items = Vec::new();

        for spreadsheet_id in self.spreadsheet_ids.iter() {
            let sheets = SheetSet::load(self.source.as_ref(), spreadsheet_id, self.layout).await?;
            let produced = build_items(spreadsheet_id, &sheets, base_url, modified);
            info!(
                spreadsheet_id = %spreadsheet_id,
                clubs = sheets.clubs.len(),
                items = produced.len(),
                "Assembled spreadsheet"
            );
            items.extend(produced);
        }

        Ok(items)
    }
}

/// Produce the items of one already-loaded spreadsheet
///
/// Item order follows club row order, then the order of the club's
/// location codes.
pub fn build_items(
    spreadsheet_id: &str,
    sheets: &SheetSet,
    base_url: &str,
    modified: i64,
) -> Vec<ClubItem> {
    let mut items = Vec::new();

    for club_row in sheets.clubs.row_indices() {
        let Some(club) = sheets.clubs.record(club_row) else {
            continue;
        };

        let organizer_cell = club.get(CLUB_ORGANIZER_FIELD).map(String::as_str).unwrap_or("");
        let Some((organizer_code, organizer_row)) = first_code(organizer_cell)
            .and_then(|code| sheets.organizers.find(&code).map(|row| (code, row)))
        else {
            debug!(club_row = club_row, "Skipping club: organizer unresolved");
            continue;
        };

        let location_cell = club.get(CLUB_LOCATION_FIELD).map(String::as_str).unwrap_or("");
        let location_rows: Vec<usize> = parse_codes(location_cell)
            .iter()
            .filter_map(|code| sheets.locations.find(code))
            .collect();
        if location_rows.is_empty() {
            debug!(club_row = club_row, "Skipping club: no location resolved");
            continue;
        }

        let Some(organizer) = build_organizer(sheets, organizer_row) else {
            debug!(club_row = club_row, organizer = %organizer_code, "Skipping club: organizer blank");
            continue;
        };

        let club_name = club.get(CLUB_NAME_FIELD).cloned().unwrap_or_default();

        for location_row in location_rows {
            let Some(location) = build_location(sheets, location_row) else {
                debug!(club_row = club_row, location_row = location_row, "Skipping blank location");
                continue;
            };

            let location_code = sheets.locations.code(location_row).unwrap_or_default();
            let item_id = format!("{}-{}-{}", spreadsheet_id, organizer_code, location_code);

            items.push(FeedItem {
                id: item_id.clone(),
                kind: ITEM_KIND.to_string(),
                state: ItemState::Updated,
                modified,
                data: Club {
                    context: OPENACTIVE_CONTEXT,
                    schema_type: SchemaType::Club,
                    id: format!("{}/{}", base_url, item_id),
                    identifier: item_id,
                    name: club_name.clone(),
                    organizer: organizer.clone(),
                    location,
                },
            });
        }
    }

    items
}
