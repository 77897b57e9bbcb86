//! Typed OpenActive output records
//!
//! Known properties are typed optional fields and are omitted when absent.
//! Any other spreadsheet column is carried through verbatim in `extra`, so
//! sheet authors can add columns without code changes.
//!
//! See <https://developer.openactive.io/data-model/types>

use indexmap::IndexMap;
use serde::Serialize;

use super::record::Record;

/// Schema type tag, serialized as `@type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchemaType {
    Club,
    Organization,
    Place,
    ImageObject,
    PostalAddress,
    GeoCoordinates,
    LocationFeatureSpecification,
}

/// Columns passed through untouched
pub type Extra = IndexMap<String, String>;

/// Insert an unrecognised column, refusing keys the typed record owns
///
/// `@type` always comes from the record's [`SchemaType`].
pub fn insert_extra(extra: &mut Extra, key: String, value: String) {
    if key != "@type" {
        extra.insert(key, value);
    }
}

/// Move every entry of `record` into an `Extra`, minus reserved keys
fn into_extra(record: Record, reserved: &[&str]) -> Extra {
    let mut extra = Extra::new();
    for (key, value) in record {
        if !reserved.contains(&key.as_str()) {
            insert_extra(&mut extra, key, value);
        }
    }
    extra
}

/// Sub-entity that can be built from a materialized row of another sheet
pub trait SubEntity: Sized {
    const SCHEMA_TYPE: SchemaType;

    fn from_record(record: Record) -> Self;
}

// ========================================
// Sub-entities
// ========================================

/// <https://developer.openactive.io/data-model/types/imageobject>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageObject {
    /// Always `ImageObject`
    #[serde(rename = "@type")]
    pub schema_type: SchemaType,
    /// Image location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Width as written in the sheet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// Height as written in the sheet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    /// Unrecognised image columns
    #[serde(flatten)]
    pub extra: Extra,
}

impl SubEntity for ImageObject {
    const SCHEMA_TYPE: SchemaType = SchemaType::ImageObject;

    fn from_record(mut record: Record) -> Self {
        Self {
            schema_type: Self::SCHEMA_TYPE,
            url: record.shift_remove("url"),
            width: record.shift_remove("width"),
            height: record.shift_remove("height"),
            extra: into_extra(record, &[]),
        }
    }
}

/// <https://developer.openactive.io/data-model/types/postaladdress>
///
/// The address sheet also carries `latitude`/`longitude`. Those never
/// reach the output on an address: organizer builders discard them and
/// location builders move them into [`GeoCoordinates`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    /// Always `PostalAddress`
    #[serde(rename = "@type")]
    pub schema_type: SchemaType,
    /// Street line, e.g. "1 High St"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    /// Town or city
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_locality: Option<String>,
    /// County or region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_region: Option<String>,
    /// Country code or name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_country: Option<String>,
    /// Postcode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Raw latitude cell, consumed by location builders
    #[serde(skip)]
    pub latitude: Option<String>,
    /// Raw longitude cell, consumed by location builders
    #[serde(skip)]
    pub longitude: Option<String>,
    /// Unrecognised address columns
    #[serde(flatten)]
    pub extra: Extra,
}

impl PostalAddress {
    /// Remove and return `(latitude, longitude)`
    pub fn take_coordinates(&mut self) -> (Option<String>, Option<String>) {
        (self.latitude.take(), self.longitude.take())
    }

    /// True when no property other than `@type` remains
    pub fn is_empty(&self) -> bool {
        self.street_address.is_none()
            && self.address_locality.is_none()
            && self.address_region.is_none()
            && self.address_country.is_none()
            && self.postal_code.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.extra.is_empty()
    }
}

impl SubEntity for PostalAddress {
    const SCHEMA_TYPE: SchemaType = SchemaType::PostalAddress;

    fn from_record(mut record: Record) -> Self {
        Self {
            schema_type: Self::SCHEMA_TYPE,
            street_address: record.shift_remove("streetAddress"),
            address_locality: record.shift_remove("addressLocality"),
            address_region: record.shift_remove("addressRegion"),
            address_country: record.shift_remove("addressCountry"),
            postal_code: record.shift_remove("postalCode"),
            latitude: record.shift_remove("latitude"),
            longitude: record.shift_remove("longitude"),
            extra: into_extra(record, &[]),
        }
    }
}

/// <https://developer.openactive.io/data-model/types/geocoordinates>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoCoordinates {
    /// Always `GeoCoordinates`
    #[serde(rename = "@type")]
    pub schema_type: SchemaType,
    /// Decimal degrees north
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Decimal degrees east
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl GeoCoordinates {
    pub fn new(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        Self {
            schema_type: SchemaType::GeoCoordinates,
            latitude,
            longitude,
        }
    }
}

/// <https://developer.openactive.io/data-model/types/locationfeaturespecification>
///
/// Presence of an amenity-feature code means the feature is present, so
/// `value` is always `true`. Absent features are never listed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationFeatureSpecification {
    /// Always `LocationFeatureSpecification`
    #[serde(rename = "@type")]
    pub schema_type: SchemaType,
    /// Feature name, e.g. "Changing Facilities"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Always `true`
    value: bool,
    /// Unrecognised feature columns
    #[serde(flatten)]
    pub extra: Extra,
}

impl LocationFeatureSpecification {
    pub fn value(&self) -> bool {
        self.value
    }
}

impl SubEntity for LocationFeatureSpecification {
    const SCHEMA_TYPE: SchemaType = SchemaType::LocationFeatureSpecification;

    fn from_record(mut record: Record) -> Self {
        Self {
            schema_type: Self::SCHEMA_TYPE,
            name: record.shift_remove("name"),
            value: true,
            extra: into_extra(record, &["value"]),
        }
    }
}

// ========================================
// Top-level entities
// ========================================

/// <https://developer.openactive.io/data-model/types/organization>
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Always `Organization`
    #[serde(rename = "@type")]
    pub schema_type: SchemaType,
    /// `@id` cell from the organizers sheet
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Organizer identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Registered name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,
    /// Free text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Contact number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    /// Contact address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Home page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Related profile URLs, split from a comma-separated cell
    #[serde(skip_serializing_if = "Option::is_none")]
    pub same_as: Option<Vec<String>>,
    /// Resolved logo image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<ImageObject>,
    /// Resolved postal address, without coordinates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<PostalAddress>,
    /// Unrecognised organizer columns
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for Organization {
    fn default() -> Self {
        Self {
            schema_type: SchemaType::Organization,
            id: None,
            identifier: None,
            name: None,
            legal_name: None,
            description: None,
            telephone: None,
            email: None,
            url: None,
            same_as: None,
            logo: None,
            address: None,
            extra: Extra::new(),
        }
    }
}

impl Organization {
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.identifier.is_none()
            && self.name.is_none()
            && self.legal_name.is_none()
            && self.description.is_none()
            && self.telephone.is_none()
            && self.email.is_none()
            && self.url.is_none()
            && self.same_as.is_none()
            && self.logo.is_none()
            && self.address.is_none()
            && self.extra.is_empty()
    }
}

/// <https://developer.openactive.io/data-model/types/place>
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Always `Place`
    #[serde(rename = "@type")]
    pub schema_type: SchemaType,
    /// `@id` cell from the locations sheet
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Location identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Contact number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    /// Contact address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Venue page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Resolved venue images, in cell order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<ImageObject>>,
    /// Resolved postal address, without coordinates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<PostalAddress>,
    /// Coordinates lifted off the address row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoCoordinates>,
    /// Resolved amenity features, in cell order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenity_feature: Option<Vec<LocationFeatureSpecification>>,
    /// Unrecognised location columns
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for Place {
    fn default() -> Self {
        Self {
            schema_type: SchemaType::Place,
            id: None,
            identifier: None,
            name: None,
            description: None,
            telephone: None,
            email: None,
            url: None,
            image: None,
            address: None,
            geo: None,
            amenity_feature: None,
            extra: Extra::new(),
        }
    }
}

impl Place {
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.identifier.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.telephone.is_none()
            && self.email.is_none()
            && self.url.is_none()
            && self.image.is_none()
            && self.address.is_none()
            && self.geo.is_none()
            && self.amenity_feature.is_none()
            && self.extra.is_empty()
    }
}

/// Feed item payload: one club at one location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Club {
    /// OpenActive and beta JSON-LD contexts
    #[serde(rename = "@context")]
    pub context: [&'static str; 2],
    /// Always `Club`
    #[serde(rename = "@type")]
    pub schema_type: SchemaType,
    /// Absolute URL of this feed item
    #[serde(rename = "@id")]
    pub id: String,
    /// Feed item id
    pub identifier: String,
    /// Club name
    pub name: String,
    /// The club's organizer
    pub organizer: Organization,
    /// The single location this item covers
    pub location: Place,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_image_object_keeps_extra_columns() {
        let image = ImageObject::from_record(record(&[
            ("url", "http://img/1.jpg"),
            ("caption", "Pitch"),
            ("@type", "Photograph"),
        ]));
        let value = serde_json::to_value(&image).unwrap();
        assert_eq!(
            value,
            json!({"@type": "ImageObject", "url": "http://img/1.jpg", "caption": "Pitch"})
        );
    }

    #[test]
    fn test_feature_value_forced_true() {
        let feature = LocationFeatureSpecification::from_record(record(&[
            ("name", "Changing Facilities"),
            ("value", "FALSE"),
        ]));
        assert!(feature.value());
        let value = serde_json::to_value(&feature).unwrap();
        assert_eq!(value["value"], json!(true));
        assert_eq!(value["@type"], "LocationFeatureSpecification");
    }

    #[test]
    fn test_postal_address_never_serializes_coordinates() {
        let address = PostalAddress::from_record(record(&[
            ("streetAddress", "1 High St"),
            ("latitude", "51.5"),
        ]));
        let value = serde_json::to_value(&address).unwrap();
        assert!(value.get("latitude").is_none());
        assert_eq!(value["streetAddress"], "1 High St");
    }

    #[test]
    fn test_postal_address_is_empty_after_taking_coordinates() {
        let mut address =
            PostalAddress::from_record(record(&[("latitude", "51.5"), ("longitude", "-0.1")]));
        assert!(!address.is_empty());
        let (lat, lng) = address.take_coordinates();
        assert_eq!(lat.as_deref(), Some("51.5"));
        assert_eq!(lng.as_deref(), Some("-0.1"));
        assert!(address.is_empty());
    }

    #[test]
    fn test_empty_organization_and_place() {
        assert!(Organization::default().is_empty());
        assert!(Place::default().is_empty());
        let place = serde_json::to_value(Place::default()).unwrap();
        assert_eq!(place, json!({"@type": "Place"}));
    }
}
