//! Normalization between the two location encodings the API emits.
//!
//! Entries come off the wire with their location either as a plain
//! `{lat, lng}` object or as a GeoJSON point `{type: "Point",
//! coordinates: [lng, lat]}`. Everything past this module works with the
//! canonical [`Point`]; the wire shapes exist only at the boundary.

use serde::{Deserialize, Serialize};

/// The canonical location used internally after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A location as it may appear on the wire.
///
/// Deserialization never fails: anything that is neither of the two accepted
/// shapes lands in `Other` and normalizes to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationInput {
    LatLng {
        lat: f64,
        lng: f64,
    },
    GeoJson {
        #[serde(rename = "type")]
        kind: String,
        /// GeoJSON axis order: `[longitude, latitude]`.
        coordinates: Vec<f64>,
    },
    Other(serde_json::Value),
}

impl From<Point> for LocationInput {
    fn from(p: Point) -> Self {
        LocationInput::LatLng {
            lat: p.lat,
            lng: p.lng,
        }
    }
}

/// Collapses a wire location into the canonical shape.
///
/// The `{lat, lng}` form wins when present. A GeoJSON value is accepted only
/// when `type` is `"Point"` and it carries at least two coordinates, in which
/// case the axes are swapped: `coordinates[1]` is the latitude. Anything else
/// yields `None`.
pub fn normalize(location: Option<&LocationInput>) -> Option<Point> {
    match location? {
        LocationInput::LatLng { lat, lng } => Some(Point::new(*lat, *lng)),
        LocationInput::GeoJson { kind, coordinates }
            if kind == "Point" && coordinates.len() >= 2 =>
        {
            Some(Point::new(coordinates[1], coordinates[0]))
        }
        _ => None,
    }
}
