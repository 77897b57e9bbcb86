//! Organizer builder
//!
//! Materializes one organizer row into an [`Organization`], resolving its
//! logo against the images sheet and its address against the addresses
//! sheet.

use super::codes::first_code;
use super::fields::{apply_fields, FieldRule};
use super::resolver::resolve_single;
use super::schema::{ImageObject, Organization, PostalAddress};
use super::sheet_set::SheetSet;

const ORGANIZER_FIELDS: &[FieldRule<Organization>] = &[
    FieldRule { name: "@id", apply: set_id },
    FieldRule { name: "identifier", apply: set_identifier },
    FieldRule { name: "name", apply: set_name },
    FieldRule { name: "legalName", apply: set_legal_name },
    FieldRule { name: "description", apply: set_description },
    FieldRule { name: "telephone", apply: set_telephone },
    FieldRule { name: "email", apply: set_email },
    FieldRule { name: "url", apply: set_url },
    FieldRule { name: "sameAs", apply: set_same_as },
    FieldRule { name: "logo", apply: set_logo },
    FieldRule { name: "address", apply: set_address },
];

/// Build the organizer at `row` of the organizers sheet
///
/// Returns `None` when the row is blank or nothing survives the field pass.
pub fn build_organizer(sheets: &SheetSet, row: usize) -> Option<Organization> {
    let record = sheets.organizers.record(row)?;

    let mut organizer = Organization::default();
    apply_fields(&mut organizer, record, ORGANIZER_FIELDS, sheets);

    if organizer.is_empty() {
        None
    } else {
        Some(organizer)
    }
}

fn set_id(org: &mut Organization, value: String, _: &SheetSet) {
    org.id = Some(value);
}

fn set_identifier(org: &mut Organization, value: String, _: &SheetSet) {
    org.identifier = Some(value);
}

fn set_name(org: &mut Organization, value: String, _: &SheetSet) {
    org.name = Some(value);
}

fn set_legal_name(org: &mut Organization, value: String, _: &SheetSet) {
    org.legal_name = Some(value);
}

fn set_description(org: &mut Organization, value: String, _: &SheetSet) {
    org.description = Some(value);
}

fn set_telephone(org: &mut Organization, value: String, _: &SheetSet) {
    org.telephone = Some(value);
}

fn set_email(org: &mut Organization, value: String, _: &SheetSet) {
    org.email = Some(value);
}

fn set_url(org: &mut Organization, value: String, _: &SheetSet) {
    org.url = Some(value);
}

/// Comma-separated list of profile URLs
fn set_same_as(org: &mut Organization, value: String, _: &SheetSet) {
    let urls: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect();
    org.same_as = if urls.is_empty() { None } else { Some(urls) };
}

fn set_logo(org: &mut Organization, value: String, sheets: &SheetSet) {
    org.logo = first_code(&value)
        .and_then(|code| resolve_single::<ImageObject>(&sheets.images, &[code]));
}

/// Organizer addresses never carry coordinates
fn set_address(org: &mut Organization, value: String, sheets: &SheetSet) {
    org.address = first_code(&value)
        .and_then(|code| resolve_single::<PostalAddress>(&sheets.addresses, &[code]))
        .and_then(|mut address| {
            address.take_coordinates();
            if address.is_empty() {
                None
            } else {
                Some(address)
            }
        });
}
