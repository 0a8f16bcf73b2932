//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod geo_resolver;
mod restaurant_store;

#[cfg(test)]
pub use geo_resolver::MockGeoLocationResolver;
pub use geo_resolver::{FixtureGeoLocationResolver, GeoLocationError, GeoLocationResolver};
#[cfg(test)]
pub use restaurant_store::MockRestaurantStore;
pub use restaurant_store::{RestaurantStore, RestaurantStoreError};
