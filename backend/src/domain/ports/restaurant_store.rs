//! Port for restaurant aggregate persistence and search queries.

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::restaurants::Restaurant;

use super::define_port_error;

define_port_error! {
    /// Errors raised by restaurant store adapters.
    pub enum RestaurantStoreError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "restaurant store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "restaurant store query failed: {message}",
        /// The aggregate's version token moved between load and save.
        VersionConflict { restaurant_id: Uuid } =>
            "restaurant {restaurant_id} was modified concurrently",
    }
}

/// Port for the document store holding restaurant aggregates.
///
/// `save` is a full-record upsert guarded by the aggregate's version token:
/// the write succeeds only when the stored version still matches, and the
/// returned representation (with its advanced version) is authoritative.
/// The four finder shapes back the search dispatch policy; all of them
/// paginate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantStore: Send + Sync {
    /// Point lookup by aggregate id.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Restaurant>, RestaurantStoreError>;

    /// Compare-and-swap upsert of the whole aggregate.
    async fn save(&self, restaurant: Restaurant) -> Result<Restaurant, RestaurantStoreError>;

    /// Remove an aggregate; removing an absent id is not an error.
    async fn delete_by_id(&self, id: &Uuid) -> Result<(), RestaurantStoreError>;

    /// All restaurants, unfiltered.
    async fn find_all(&self, request: PageRequest)
    -> Result<Page<Restaurant>, RestaurantStoreError>;

    /// Restaurants whose pre-materialised average rating reaches `min_rating`.
    async fn find_by_min_rating(
        &self,
        min_rating: f32,
        request: PageRequest,
    ) -> Result<Page<Restaurant>, RestaurantStoreError>;

    /// Free-text match combined with a minimum average rating.
    async fn find_by_query_and_min_rating(
        &self,
        query: &str,
        min_rating: f32,
        request: PageRequest,
    ) -> Result<Page<Restaurant>, RestaurantStoreError>;

    /// Restaurants whose stored coordinates fall within `radius_km` of a point.
    async fn find_by_location_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
        request: PageRequest,
    ) -> Result<Page<Restaurant>, RestaurantStoreError>;
}
