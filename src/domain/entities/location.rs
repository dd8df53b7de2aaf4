//! Geocoded location entity and resolution result.

use serde::{Deserialize, Serialize};

/// One geocoded place as returned by the upstream search API.
///
/// Coordinates and bounding box stay in their upstream string form so a
/// record written to the cache reads back byte-for-byte identical. Attributes
/// the upstream leaves out (it omits `icon` for most classes) decode to their
/// empty value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationRecord {
    pub place_id: i64,
    pub licence: String,
    pub osm_type: String,
    pub osm_id: i64,
    pub boundingbox: Vec<String>,
    pub lat: String,
    pub lon: String,
    pub display_name: String,
    pub class: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub importance: f64,
    pub icon: String,
}

/// Locations for one query plus whether they came from the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionResult {
    pub locations: Vec<LocationRecord>,
    pub cache_hit: bool,
}

impl ResolutionResult {
    pub fn hit(locations: Vec<LocationRecord>) -> Self {
        Self {
            locations,
            cache_hit: true,
        }
    }

    pub fn miss(locations: Vec<LocationRecord>) -> Self {
        Self {
            locations,
            cache_hit: false,
        }
    }
}
