//! Geocoding adapters for the geolocation resolver port.

mod nominatim;

pub use nominatim::NominatimGeoLocationResolver;
