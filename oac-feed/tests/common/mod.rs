//! Shared spreadsheet fixtures for oac-feed integration tests
#![allow(dead_code)]

use std::sync::Arc;

use oac_common::SpreadsheetIds;
use oac_feed::engine::{FeedAssembler, SheetLayout};
use oac_feed::sheets::{Grid, InMemorySheets};

pub const CLUB_HEADERS: &[&str] = &["code", "name", "organizer", "location"];

/// Sheet in the default layout: field names, two metadata rows, then data
pub fn sheet(headers: &[&str], rows: &[&[&str]]) -> Grid {
    let mut grid: Grid = vec![
        headers.iter().map(|h| h.to_string()).collect(),
        vec!["(type)".to_string()],
        vec!["(description)".to_string()],
    ];
    grid.extend(
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect::<Vec<_>>()),
    );
    grid
}

/// Add one spreadsheet with the standard reference sheets and the given clubs
pub fn with_spreadsheet(source: InMemorySheets, id: &str, clubs: &[&[&str]]) -> InMemorySheets {
    source
        .with_sheet(id, "clubs", sheet(CLUB_HEADERS, clubs))
        .with_sheet(
            id,
            "organizers",
            sheet(
                &["code", "name", "sameAs", "logo", "address", "charityNumber"],
                &[
                    &["A1", "Riverside AC", "https://a.example, https://b.example", "IMG1", "ADDR1", "12345"],
                    &["BLANK", " , ", ""],
                ],
            ),
        )
        .with_sheet(
            id,
            "locations",
            sheet(
                &["code", "name", "image", "address", "amenityFeature"],
                &[
                    &["L1", "Riverside Park", "IMG1, IMG1", "ADDR1", ""],
                    &["L3", "Town Hall", "IMG2", "ADDR2", "F1"],
                    &["LBLANK", ",", "NOPE"],
                ],
            ),
        )
        .with_sheet(
            id,
            "addresses",
            sheet(
                &["code", "streetAddress", "latitude", "longitude"],
                &[
                    &["ADDR1", "1 River Rd", "51.5", "-0.12"],
                    &["ADDR2", "Market Sq"],
                ],
            ),
        )
        .with_sheet(
            id,
            "images",
            sheet(
                &["code", "url"],
                &[
                    &["IMG1", "https://img.example/1.png"],
                    &["IMG2", "https://img.example/2.png"],
                ],
            ),
        )
        .with_sheet(
            id,
            "amenity features",
            sheet(&["code", "name"], &[&["F1", "Parking"]]),
        )
}

/// Assembler over `source` for the given spreadsheets in the default layout
pub fn assembler(source: InMemorySheets, ids: &[&str]) -> FeedAssembler {
    let ids = SpreadsheetIds::new(ids.iter().map(|id| id.to_string()).collect());
    FeedAssembler::new(Arc::new(source), ids, SheetLayout::default())
}
