//! Postal address and geographic point value objects.

/// A structured postal address.
///
/// All components apart from `unit` are required; the inbound adapter
/// enforces that before a request reaches the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// House or building number, e.g. `"221b"`.
    pub street_number: String,
    /// Street name without the number.
    pub street_name: String,
    /// Apartment, suite, or floor, when applicable.
    pub unit: Option<String>,
    /// City or locality.
    pub city: String,
    /// State, province, or region.
    pub state: String,
    /// Postal or ZIP code.
    pub postal_code: String,
    /// Country name.
    pub country: String,
}

/// A WGS84 coordinate pair produced by the geolocation resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl GeoPoint {
    /// Build a point from latitude and longitude in decimal degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}
