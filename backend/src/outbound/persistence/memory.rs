//! In-process document store adapter for restaurant aggregates.
//!
//! Backs the [`RestaurantStore`] port with a plain map guarded by a
//! read/write lock. Saves are compare-and-swap on the aggregate's version
//! token, matching the behaviour expected from the real document store; the
//! four finder shapes evaluate their filters over the full collection and
//! paginate the ordered result.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::ports::{RestaurantStore, RestaurantStoreError};
use crate::domain::restaurants::{GeoPoint, Restaurant};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometres.
fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let from_lat = from.latitude.to_radians();
    let to_lat = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + from_lat.cos() * to_lat.cos() * (delta_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

fn matches_query(restaurant: &Restaurant, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    restaurant.name.to_lowercase().contains(&needle)
        || restaurant.cuisine_type.to_lowercase().contains(&needle)
}

/// Map-backed implementation of the restaurant store port.
#[derive(Debug, Default)]
pub struct InMemoryRestaurantStore {
    records: RwLock<HashMap<Uuid, Restaurant>>,
}

impl InMemoryRestaurantStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read_filtered<F>(
        &self,
        request: &PageRequest,
        filter: F,
    ) -> Result<Page<Restaurant>, RestaurantStoreError>
    where
        F: Fn(&Restaurant) -> bool,
    {
        let records = self
            .records
            .read()
            .map_err(|_| RestaurantStoreError::query("store lock poisoned"))?;

        let mut matching: Vec<Restaurant> = records
            .values()
            .filter(|restaurant| filter(restaurant))
            .cloned()
            .collect();
        // Name then id keeps the listing order stable across calls.
        matching.sort_by(|lhs, rhs| lhs.name.cmp(&rhs.name).then_with(|| lhs.id.cmp(&rhs.id)));

        Ok(Page::from_complete(matching, request))
    }
}

#[async_trait]
impl RestaurantStore for InMemoryRestaurantStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Restaurant>, RestaurantStoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| RestaurantStoreError::query("store lock poisoned"))?;
        Ok(records.get(id).cloned())
    }

    async fn save(&self, restaurant: Restaurant) -> Result<Restaurant, RestaurantStoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RestaurantStoreError::query("store lock poisoned"))?;

        match records.get(&restaurant.id) {
            Some(existing) if existing.version != restaurant.version => {
                return Err(RestaurantStoreError::version_conflict(restaurant.id));
            }
            // A fresh aggregate carries version 0; anything else means the
            // record was deleted underneath the caller.
            None if restaurant.version != 0 => {
                return Err(RestaurantStoreError::version_conflict(restaurant.id));
            }
            _ => {}
        }

        let mut stored = restaurant;
        stored.version += 1;
        records.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<(), RestaurantStoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RestaurantStoreError::query("store lock poisoned"))?;
        records.remove(id);
        Ok(())
    }

    async fn find_all(
        &self,
        request: PageRequest,
    ) -> Result<Page<Restaurant>, RestaurantStoreError> {
        self.read_filtered(&request, |_| true)
    }

    async fn find_by_min_rating(
        &self,
        min_rating: f32,
        request: PageRequest,
    ) -> Result<Page<Restaurant>, RestaurantStoreError> {
        self.read_filtered(&request, |restaurant| {
            restaurant.average_rating >= min_rating
        })
    }

    async fn find_by_query_and_min_rating(
        &self,
        query: &str,
        min_rating: f32,
        request: PageRequest,
    ) -> Result<Page<Restaurant>, RestaurantStoreError> {
        self.read_filtered(&request, |restaurant| {
            restaurant.average_rating >= min_rating && matches_query(restaurant, query)
        })
    }

    async fn find_by_location_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
        request: PageRequest,
    ) -> Result<Page<Restaurant>, RestaurantStoreError> {
        let centre = GeoPoint::new(latitude, longitude);
        self.read_filtered(&request, |restaurant| {
            haversine_km(restaurant.geo_location, centre) <= radius_km
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::Utc;

    use crate::domain::restaurants::{Address, OperatingHours, Review};
    use crate::domain::user::{User, UserId};

    use super::*;

    fn restaurant(name: &str, cuisine: &str, rating: f32, location: GeoPoint) -> Restaurant {
        Restaurant {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            cuisine_type: cuisine.to_owned(),
            contact_information: "000".to_owned(),
            address: Address {
                street_number: "1".to_owned(),
                street_name: "High Street".to_owned(),
                unit: None,
                city: "London".to_owned(),
                state: "Greater London".to_owned(),
                postal_code: "E1 6AN".to_owned(),
                country: "United Kingdom".to_owned(),
            },
            geo_location: location,
            operating_hours: OperatingHours::default(),
            average_rating: rating,
            photos: Vec::new(),
            reviews: Vec::new(),
            version: 0,
        }
    }

    async fn seeded_store() -> InMemoryRestaurantStore {
        let store = InMemoryRestaurantStore::new();
        let central = GeoPoint::new(51.515, -0.09);
        let distant = GeoPoint::new(48.857, 2.352);
        for record in [
            restaurant("Sushi Karasu", "Japanese", 4.5, central),
            restaurant("Sushi Baron", "Japanese", 3.0, central),
            restaurant("Pasta Presto", "Italian", 4.0, distant),
            restaurant("Grain & Graze", "Brunch", 2.0, central),
        ] {
            store.save(record).await.expect("seed save succeeds");
        }
        store
    }

    #[tokio::test]
    async fn save_assigns_versions_and_round_trips() {
        let store = InMemoryRestaurantStore::new();
        let record = restaurant("Solo", "Tapas", 0.0, GeoPoint::new(0.0, 0.0));
        let id = record.id;

        let saved = store.save(record).await.expect("first save succeeds");
        assert_eq!(saved.version, 1);

        let found = store
            .find_by_id(&id)
            .await
            .expect("lookup succeeds")
            .expect("record present");
        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn save_rejects_stale_versions() {
        let store = InMemoryRestaurantStore::new();
        let record = restaurant("Solo", "Tapas", 0.0, GeoPoint::new(0.0, 0.0));

        let first = store.save(record.clone()).await.expect("first save");
        // A concurrent writer moves the aggregate forward.
        store.save(first.clone()).await.expect("second save");

        let stale = store.save(first).await.expect_err("stale write rejected");
        assert!(matches!(
            stale,
            RestaurantStoreError::VersionConflict { .. }
        ));
    }

    #[tokio::test]
    async fn save_rejects_resurrecting_a_deleted_record() {
        let store = InMemoryRestaurantStore::new();
        let record = restaurant("Solo", "Tapas", 0.0, GeoPoint::new(0.0, 0.0));

        let saved = store.save(record).await.expect("first save");
        store.delete_by_id(&saved.id).await.expect("delete");

        let error = store.save(saved).await.expect_err("record vanished");
        assert!(matches!(
            error,
            RestaurantStoreError::VersionConflict { .. }
        ));
    }

    #[tokio::test]
    async fn saved_reviews_travel_with_the_aggregate() {
        let store = InMemoryRestaurantStore::new();
        let mut record = restaurant("Solo", "Tapas", 0.0, GeoPoint::new(0.0, 0.0));
        let now = Utc::now();
        record.reviews.push(Review {
            id: Uuid::new_v4(),
            content: "lovely".to_owned(),
            rating: 5,
            photos: Vec::new(),
            date_posted: now,
            last_edited: now,
            written_by: User::from_id(UserId::random()),
        });
        let id = record.id;

        store.save(record).await.expect("save succeeds");

        let found = store
            .find_by_id(&id)
            .await
            .expect("lookup succeeds")
            .expect("record present");
        assert_eq!(found.reviews.len(), 1);
    }

    #[tokio::test]
    async fn delete_of_a_missing_id_is_not_an_error() {
        let store = InMemoryRestaurantStore::new();
        store
            .delete_by_id(&Uuid::new_v4())
            .await
            .expect("missing delete is fine");
    }

    #[tokio::test]
    async fn min_rating_filter_uses_the_materialised_average() {
        let store = seeded_store().await;

        let page = store
            .find_by_min_rating(4.0, PageRequest::default())
            .await
            .expect("query succeeds");

        assert_eq!(page.total(), 2);
        assert!(page
            .content()
            .iter()
            .all(|restaurant| restaurant.average_rating >= 4.0));
    }

    #[tokio::test]
    async fn text_query_matches_name_and_cuisine_case_insensitively() {
        let store = seeded_store().await;

        let by_name = store
            .find_by_query_and_min_rating("sushi", 0.0, PageRequest::default())
            .await
            .expect("query succeeds");
        assert_eq!(by_name.total(), 2);

        let by_cuisine = store
            .find_by_query_and_min_rating("ITALIAN", 0.0, PageRequest::default())
            .await
            .expect("query succeeds");
        assert_eq!(by_cuisine.total(), 1);

        let rated = store
            .find_by_query_and_min_rating("sushi", 4.0, PageRequest::default())
            .await
            .expect("query succeeds");
        assert_eq!(rated.total(), 1);
    }

    #[tokio::test]
    async fn geo_query_filters_by_haversine_distance() {
        let store = seeded_store().await;

        // Centre of London with a radius that excludes Paris.
        let page = store
            .find_by_location_near(51.5074, -0.1278, 5.0, PageRequest::default())
            .await
            .expect("query succeeds");

        assert_eq!(page.total(), 3);
    }

    #[tokio::test]
    async fn find_all_paginates_with_a_stable_order() {
        let store = seeded_store().await;

        let first = store
            .find_all(PageRequest::new(0, 3).expect("valid request"))
            .await
            .expect("query succeeds");
        let second = store
            .find_all(PageRequest::new(3, 3).expect("valid request"))
            .await
            .expect("query succeeds");

        assert_eq!(first.total(), 4);
        assert_eq!(first.content().len(), 3);
        assert_eq!(second.content().len(), 1);

        let mut names: Vec<String> = first
            .content()
            .iter()
            .chain(second.content())
            .map(|restaurant| restaurant.name.clone())
            .collect();
        let ordered = names.clone();
        names.sort();
        assert_eq!(names, ordered);
    }

    #[test]
    fn haversine_reports_zero_for_identical_points() {
        let point = GeoPoint::new(51.5, -0.1);
        assert!(haversine_km(point, point) < 1e-9);
    }

    #[test]
    fn haversine_matches_a_known_distance() {
        // London to Paris is roughly 344 km.
        let london = GeoPoint::new(51.5074, -0.1278);
        let paris = GeoPoint::new(48.8566, 2.3522);
        let distance = haversine_km(london, paris);
        assert!((330.0..360.0).contains(&distance), "distance {distance}");
    }
}
