//! Location builder
//!
//! Materializes one location row into a [`Place`]: images and amenity
//! features resolve every code in the cell, the address resolves its first
//! code and has any coordinates split out into a sibling `geo`.

use tracing::{debug, warn};

use super::codes::{first_code, parse_codes};
use super::fields::{apply_fields, FieldRule};
use super::resolver::{resolve_multiple, resolve_single};
use super::schema::{GeoCoordinates, ImageObject, LocationFeatureSpecification, Place, PostalAddress};
use super::sheet_set::SheetSet;

const LOCATION_FIELDS: &[FieldRule<Place>] = &[
    FieldRule { name: "@id", apply: set_id },
    FieldRule { name: "identifier", apply: set_identifier },
    FieldRule { name: "name", apply: set_name },
    FieldRule { name: "description", apply: set_description },
    FieldRule { name: "telephone", apply: set_telephone },
    FieldRule { name: "email", apply: set_email },
    FieldRule { name: "url", apply: set_url },
    FieldRule { name: "image", apply: set_image },
    FieldRule { name: "address", apply: set_address },
    FieldRule { name: "geo", apply: ignore_geo },
    FieldRule { name: "amenityFeature", apply: set_amenity_feature },
];

/// Build the location at `row` of the locations sheet
///
/// Returns `None` when the row is blank or nothing survives the field pass.
pub fn build_location(sheets: &SheetSet, row: usize) -> Option<Place> {
    let record = sheets.locations.record(row)?;

    let mut location = Place::default();
    apply_fields(&mut location, record, LOCATION_FIELDS, sheets);

    if location.is_empty() {
        None
    } else {
        Some(location)
    }
}

fn set_id(place: &mut Place, value: String, _: &SheetSet) {
    place.id = Some(value);
}

fn set_identifier(place: &mut Place, value: String, _: &SheetSet) {
    place.identifier = Some(value);
}

fn set_name(place: &mut Place, value: String, _: &SheetSet) {
    place.name = Some(value);
}

fn set_description(place: &mut Place, value: String, _: &SheetSet) {
    place.description = Some(value);
}

fn set_telephone(place: &mut Place, value: String, _: &SheetSet) {
    place.telephone = Some(value);
}

fn set_email(place: &mut Place, value: String, _: &SheetSet) {
    place.email = Some(value);
}

fn set_url(place: &mut Place, value: String, _: &SheetSet) {
    place.url = Some(value);
}

fn set_image(place: &mut Place, value: String, sheets: &SheetSet) {
    place.image = resolve_multiple::<ImageObject>(&sheets.images, &parse_codes(&value));
}

fn set_amenity_feature(place: &mut Place, value: String, sheets: &SheetSet) {
    place.amenity_feature =
        resolve_multiple::<LocationFeatureSpecification>(&sheets.amenity_features, &parse_codes(&value));
}

/// `geo` is derived from the address, never taken from a column
fn ignore_geo(_: &mut Place, _: String, _: &SheetSet) {
    debug!("Ignoring literal geo column on location");
}

fn set_address(place: &mut Place, value: String, sheets: &SheetSet) {
    let Some(mut address) = first_code(&value)
        .and_then(|code| resolve_single::<PostalAddress>(&sheets.addresses, &[code]))
    else {
        place.address = None;
        return;
    };

    let (latitude, longitude) = address.take_coordinates();
    if latitude.is_some() || longitude.is_some() {
        let latitude = latitude.and_then(|v| parse_coordinate("latitude", &v));
        let longitude = longitude.and_then(|v| parse_coordinate("longitude", &v));
        if latitude.is_some() || longitude.is_some() {
            place.geo = Some(GeoCoordinates::new(latitude, longitude));
        }
    }

    place.address = if address.is_empty() { None } else { Some(address) };
}

/// Coerce a coordinate cell to a finite number
fn parse_coordinate(axis: &str, value: &str) -> Option<f64> {
    match value.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => Some(number),
        _ => {
            warn!(axis = axis, value = %value, "Dropping non-numeric coordinate");
            None
        }
    }
}
