//! The six indexed sheets of one spreadsheet

use tracing::debug;

use super::sheet_index::{SheetIndex, SheetLayout};
use crate::sheets::{FetchError, Grid, SheetSource};

pub const SHEET_CLUBS: &str = "clubs";
pub const SHEET_ORGANIZERS: &str = "organizers";
pub const SHEET_LOCATIONS: &str = "locations";
pub const SHEET_ADDRESSES: &str = "addresses";
pub const SHEET_IMAGES: &str = "images";
pub const SHEET_AMENITY_FEATURES: &str = "amenity features";

/// Sheet indexes for one spreadsheet
///
/// Created at the start of processing a spreadsheet and dropped once its
/// items are produced.
#[derive(Debug, Clone, Default)]
pub struct SheetSet {
    pub clubs: SheetIndex,
    pub organizers: SheetIndex,
    pub locations: SheetIndex,
    pub addresses: SheetIndex,
    pub images: SheetIndex,
    pub amenity_features: SheetIndex,
}

impl SheetSet {
    /// Fetch and index all six sheets, one after another
    ///
    /// Any fetch failure aborts the whole spreadsheet.
    pub async fn load(
        source: &dyn SheetSource,
        spreadsheet_id: &str,
        layout: SheetLayout,
    ) -> Result<Self, FetchError> {
        Ok(Self {
            clubs: fetch_index(source, spreadsheet_id, SHEET_CLUBS, layout).await?,
            organizers: fetch_index(source, spreadsheet_id, SHEET_ORGANIZERS, layout).await?,
            locations: fetch_index(source, spreadsheet_id, SHEET_LOCATIONS, layout).await?,
            addresses: fetch_index(source, spreadsheet_id, SHEET_ADDRESSES, layout).await?,
            images: fetch_index(source, spreadsheet_id, SHEET_IMAGES, layout).await?,
            amenity_features: fetch_index(source, spreadsheet_id, SHEET_AMENITY_FEATURES, layout)
                .await?,
        })
    }

    /// Index already-fetched grids
    pub fn from_grids(
        clubs: &Grid,
        organizers: &Grid,
        locations: &Grid,
        addresses: &Grid,
        images: &Grid,
        amenity_features: &Grid,
        layout: SheetLayout,
    ) -> Self {
        Self {
            clubs: SheetIndex::from_grid(SHEET_CLUBS, clubs, layout),
            organizers: SheetIndex::from_grid(SHEET_ORGANIZERS, organizers, layout),
            locations: SheetIndex::from_grid(SHEET_LOCATIONS, locations, layout),
            addresses: SheetIndex::from_grid(SHEET_ADDRESSES, addresses, layout),
            images: SheetIndex::from_grid(SHEET_IMAGES, images, layout),
            amenity_features: SheetIndex::from_grid(SHEET_AMENITY_FEATURES, amenity_features, layout),
        }
    }
}

async fn fetch_index(
    source: &dyn SheetSource,
    spreadsheet_id: &str,
    name: &str,
    layout: SheetLayout,
) -> Result<SheetIndex, FetchError> {
    let grid = source.fetch_sheet(spreadsheet_id, name).await?;
    debug!(
        spreadsheet_id = %spreadsheet_id,
        sheet = %name,
        rows = grid.len(),
        "Fetched sheet"
    );
    Ok(SheetIndex::from_grid(name, &grid, layout))
}
