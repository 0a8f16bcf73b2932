//! Restaurant management and search dispatch domain service.

use std::sync::Arc;

use mockable::Clock;
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::ports::{
    GeoLocationError, GeoLocationResolver, RestaurantStore, RestaurantStoreError,
};
use crate::domain::restaurants::{Address, OperatingHours, Photo, Restaurant};

/// Attempts at the load→mutate→save cycle before giving up on a conflict.
const MAX_SAVE_ATTEMPTS: u32 = 3;

/// Caller-supplied fields for creating or replacing a restaurant record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantCreateUpdateRequest {
    /// Display name.
    pub name: String,
    /// Cuisine category.
    pub cuisine_type: String,
    /// Contact detail, e.g. a phone number.
    pub contact_information: String,
    /// Postal address; geocoded on every create and update.
    pub address: Address,
    /// Weekly opening times.
    pub operating_hours: OperatingHours,
    /// Upload identifiers for the restaurant's photos.
    pub photo_ids: Vec<String>,
}

/// Optional search filters; the dispatcher picks exactly one query shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantSearchRequest {
    /// Free-text query over name and cuisine.
    pub query: Option<String>,
    /// Minimum average rating.
    pub min_rating: Option<f32>,
    /// Geo filter latitude.
    pub latitude: Option<f64>,
    /// Geo filter longitude.
    pub longitude: Option<f64>,
    /// Geo filter radius in kilometres.
    pub radius_km: Option<f64>,
}

fn map_store_error(error: RestaurantStoreError) -> Error {
    match error {
        RestaurantStoreError::Connection { message } => {
            Error::service_unavailable(format!("restaurant store unavailable: {message}"))
        }
        RestaurantStoreError::Query { message } => {
            Error::internal(format!("restaurant store error: {message}"))
        }
        RestaurantStoreError::VersionConflict { restaurant_id } => Error::internal(format!(
            "restaurant {restaurant_id} kept changing while saving"
        )),
    }
}

fn map_geo_error(error: GeoLocationError) -> Error {
    match error {
        GeoLocationError::Unavailable { message } => {
            Error::service_unavailable(format!("geolocation resolver unavailable: {message}"))
        }
        GeoLocationError::Unresolved { message } => {
            Error::invalid_request(format!("address could not be geolocated: {message}"))
        }
    }
}

/// Domain service owning restaurant records and search dispatch.
#[derive(Clone)]
pub struct RestaurantService {
    store: Arc<dyn RestaurantStore>,
    geo_resolver: Arc<dyn GeoLocationResolver>,
    clock: Arc<dyn Clock>,
}

impl RestaurantService {
    /// Create the service with its store, geolocation resolver, and clock.
    pub fn new(
        store: Arc<dyn RestaurantStore>,
        geo_resolver: Arc<dyn GeoLocationResolver>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            geo_resolver,
            clock,
        }
    }

    /// Create a restaurant record with a geocoded address.
    ///
    /// The resolver failure fails the whole operation; a fresh record starts
    /// with no reviews and an average rating of zero.
    pub async fn create_restaurant(
        &self,
        request: &RestaurantCreateUpdateRequest,
    ) -> Result<Restaurant, Error> {
        let geo_location = self
            .geo_resolver
            .geo_locate(&request.address)
            .await
            .map_err(map_geo_error)?;

        let now = self.clock.utc();
        let restaurant = Restaurant {
            id: Uuid::new_v4(),
            name: request.name.clone(),
            cuisine_type: request.cuisine_type.clone(),
            contact_information: request.contact_information.clone(),
            address: request.address.clone(),
            geo_location,
            operating_hours: request.operating_hours.clone(),
            average_rating: 0.0,
            photos: Photo::from_ids(&request.photo_ids, now),
            reviews: Vec::new(),
            version: 0,
        };

        self.store.save(restaurant).await.map_err(map_store_error)
    }

    /// Point lookup by id.
    pub async fn get_restaurant(&self, id: &Uuid) -> Result<Option<Restaurant>, Error> {
        self.store.find_by_id(id).await.map_err(map_store_error)
    }

    /// Replace a restaurant's descriptive fields, re-geocoding the address.
    ///
    /// Reviews and the derived average rating are left untouched; photos are
    /// rebuilt with fresh upload timestamps.
    pub async fn update_restaurant(
        &self,
        id: &Uuid,
        request: &RestaurantCreateUpdateRequest,
    ) -> Result<Restaurant, Error> {
        // The address comes from the request alone, so one resolution covers
        // every save attempt.
        let geo_location = self
            .geo_resolver
            .geo_locate(&request.address)
            .await
            .map_err(map_geo_error)?;

        for attempt in 1..=MAX_SAVE_ATTEMPTS {
            let mut restaurant = self
                .store
                .find_by_id(id)
                .await
                .map_err(map_store_error)?
                .ok_or_else(|| Error::not_found(format!("restaurant {id} not found")))?;

            let now = self.clock.utc();
            restaurant.name = request.name.clone();
            restaurant.cuisine_type = request.cuisine_type.clone();
            restaurant.contact_information = request.contact_information.clone();
            restaurant.address = request.address.clone();
            restaurant.geo_location = geo_location;
            restaurant.operating_hours = request.operating_hours.clone();
            restaurant.photos = Photo::from_ids(&request.photo_ids, now);

            match self.store.save(restaurant).await {
                Ok(saved) => return Ok(saved),
                Err(RestaurantStoreError::VersionConflict { .. })
                    if attempt < MAX_SAVE_ATTEMPTS =>
                {
                    tracing::warn!(restaurant_id = %id, attempt, "retrying restaurant update after version conflict");
                }
                Err(error) => return Err(map_store_error(error)),
            }
        }

        Err(Error::internal("restaurant save retries exhausted"))
    }

    /// Remove a restaurant and its embedded reviews.
    pub async fn delete_restaurant(&self, id: &Uuid) -> Result<(), Error> {
        self.store.delete_by_id(id).await.map_err(map_store_error)
    }

    /// Dispatch a search to exactly one store query shape.
    ///
    /// Filters are evaluated in strict priority order: rating-only, then
    /// free text (with the rating floor defaulting to zero), then the geo
    /// triple, then unfiltered. Filters outside the matched branch are
    /// ignored.
    pub async fn search_restaurants(
        &self,
        request: &RestaurantSearchRequest,
        page: PageRequest,
    ) -> Result<Page<Restaurant>, Error> {
        let query = request.query.as_deref();

        if let Some(min_rating) = request.min_rating {
            if query.is_none_or(str::is_empty) {
                return self
                    .store
                    .find_by_min_rating(min_rating, page)
                    .await
                    .map_err(map_store_error);
            }
        }

        if let Some(text) = query {
            if !text.trim().is_empty() {
                let min_rating = request.min_rating.unwrap_or(0.0);
                return self
                    .store
                    .find_by_query_and_min_rating(text, min_rating, page)
                    .await
                    .map_err(map_store_error);
            }
        }

        if let (Some(latitude), Some(longitude), Some(radius_km)) =
            (request.latitude, request.longitude, request.radius_km)
        {
            return self
                .store
                .find_by_location_near(latitude, longitude, radius_km, page)
                .await
                .map_err(map_store_error);
        }

        self.store.find_all(page).await.map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "restaurant_service_tests.rs"]
mod tests;
