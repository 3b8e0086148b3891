//! Geocoding module for address lookup
//!
//! Provides a client for Nominatim-compatible search APIs, used by the
//! report form to turn a typed address into coordinates and back.

mod nominatim_client;

pub use nominatim_client::{GeocodedPlace, NominatimClient};
