//! Upstream geocoding clients.
//!
//! - [`NominatimClient`] - OpenStreetMap Nominatim search API

mod nominatim;

pub use nominatim::{DEFAULT_BASE_URL, NominatimClient, NominatimConfig};
