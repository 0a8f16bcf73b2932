//! Port for resolving postal addresses into coordinates.

use async_trait::async_trait;

use crate::domain::restaurants::{Address, GeoPoint};

use super::define_port_error;

define_port_error! {
    /// Errors raised by geolocation resolver adapters.
    pub enum GeoLocationError {
        /// The resolver backend could not be reached.
        Unavailable { message: String } =>
            "geolocation resolver unavailable: {message}",
        /// The address did not resolve to any coordinates.
        Unresolved { message: String } =>
            "address could not be geolocated: {message}",
    }
}

/// Port for the external geocoding service.
///
/// Invoked once per restaurant create or update; a resolution failure fails
/// the whole operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoLocationResolver: Send + Sync {
    /// Convert a postal address into coordinates.
    async fn geo_locate(&self, address: &Address) -> Result<GeoPoint, GeoLocationError>;
}

/// Fixture resolver for development and tests that do not exercise
/// geocoding; always yields the same central point.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGeoLocationResolver;

impl FixtureGeoLocationResolver {
    /// Coordinates returned for every address.
    pub const FIXED_POINT: GeoPoint = GeoPoint {
        latitude: 51.5074,
        longitude: -0.1278,
    };
}

#[async_trait]
impl GeoLocationResolver for FixtureGeoLocationResolver {
    async fn geo_locate(&self, _address: &Address) -> Result<GeoPoint, GeoLocationError> {
        Ok(Self::FIXED_POINT)
    }
}
