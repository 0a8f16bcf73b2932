//! Review lifecycle domain service.
//!
//! Enforces authorship, one-review-per-user, and the 48-hour edit window for
//! reviews embedded in a restaurant aggregate, recomputing the aggregate
//! rating after every mutation. Each mutation runs a load→mutate→save cycle
//! guarded by the store's version token and retried a bounded number of
//! times on conflict.

use std::sync::Arc;

use mockable::Clock;
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::ports::{RestaurantStore, RestaurantStoreError};
use crate::domain::restaurants::{Photo, Restaurant, Review};
use crate::domain::review_paging::{self, ReviewSortKey, SortDirection};
use crate::domain::user::User;

/// Attempts at the load→mutate→save cycle before giving up on a conflict.
const MAX_SAVE_ATTEMPTS: u32 = 3;

/// Caller-supplied fields for creating or replacing a review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewCreateUpdateRequest {
    /// Review body text.
    pub content: String,
    /// Star rating; range-checked by the inbound adapter.
    pub rating: u8,
    /// Upload identifiers for the attached photos.
    pub photo_ids: Vec<String>,
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

/// Domain service owning the review lifecycle inside restaurant aggregates.
#[derive(Clone)]
pub struct ReviewService {
    store: Arc<dyn RestaurantStore>,
    clock: Arc<dyn Clock>,
}

impl ReviewService {
    /// Create the service with the restaurant store and a clock source.
    pub fn new(store: Arc<dyn RestaurantStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    async fn load_restaurant(&self, restaurant_id: &Uuid) -> Result<Restaurant, Error> {
        self.store
            .find_by_id(restaurant_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("restaurant {restaurant_id} not found")))
    }

    /// Post a new review to a restaurant on behalf of `author`.
    ///
    /// Fails with `NotFound` when the restaurant is absent and with
    /// `ReviewNotAllowed` when the author already has a review there. The
    /// returned review is the one materialised in the persisted aggregate,
    /// not the pre-save in-memory value.
    pub async fn create_review(
        &self,
        author: &User,
        restaurant_id: &Uuid,
        request: &ReviewCreateUpdateRequest,
    ) -> Result<Review, Error> {
        for attempt in 1..=MAX_SAVE_ATTEMPTS {
            let mut restaurant = self.load_restaurant(restaurant_id).await?;

            if restaurant.has_review_by(&author.id) {
                return Err(Error::review_not_allowed(
                    "user has already written a review for this restaurant",
                ));
            }

            let now = self.clock.utc();
            let review_id = Uuid::new_v4();
            restaurant.reviews.push(Review {
                id: review_id,
                content: request.content.clone(),
                rating: request.rating,
                photos: Photo::from_ids(&request.photo_ids, now),
                date_posted: now,
                last_edited: now,
                written_by: author.clone(),
            });
            restaurant.refresh_average_rating();

            match self.store.save(restaurant).await {
                Ok(saved) => {
                    return saved
                        .reviews
                        .into_iter()
                        .find(|review| review.id == review_id)
                        .ok_or_else(|| {
                            Error::internal("created review missing from the saved aggregate")
                        });
                }
                Err(RestaurantStoreError::VersionConflict { .. })
                    if attempt < MAX_SAVE_ATTEMPTS =>
                {
                    tracing::warn!(%restaurant_id, attempt, "retrying review create after version conflict");
                }
                Err(error) => return Err(map_store_error(error)),
            }
        }

        Err(Error::internal("review save retries exhausted"))
    }

    /// Replace the content, rating, and photos of an existing review.
    ///
    /// Only the original author may edit, and only within 48 hours of the
    /// original posting time; `last_edited` moves, `date_posted` does not.
    pub async fn update_review(
        &self,
        author: &User,
        restaurant_id: &Uuid,
        review_id: &Uuid,
        request: &ReviewCreateUpdateRequest,
    ) -> Result<Review, Error> {
        for attempt in 1..=MAX_SAVE_ATTEMPTS {
            let mut restaurant = self.load_restaurant(restaurant_id).await?;

            let existing = restaurant
                .review(review_id)
                .ok_or_else(|| Error::review_not_allowed("review does not exist"))?
                .clone();

            if !existing.is_written_by(&author.id) {
                return Err(Error::review_not_allowed(
                    "cannot update another user's review",
                ));
            }

            let now = self.clock.utc();
            if !existing.editable_at(now) {
                return Err(Error::review_not_allowed("review can no longer be updated"));
            }

            // Rebuild the collection with the updated review replacing the
            // old entry; position within the collection is not preserved.
            restaurant.reviews.retain(|review| review.id != *review_id);
            restaurant.reviews.push(Review {
                id: existing.id,
                content: request.content.clone(),
                rating: request.rating,
                photos: Photo::from_ids(&request.photo_ids, now),
                date_posted: existing.date_posted,
                last_edited: now,
                written_by: existing.written_by,
            });
            restaurant.refresh_average_rating();

            match self.store.save(restaurant).await {
                Ok(saved) => {
                    return saved
                        .reviews
                        .into_iter()
                        .find(|review| review.id == *review_id)
                        .ok_or_else(|| {
                            Error::internal("updated review missing from the saved aggregate")
                        });
                }
                Err(RestaurantStoreError::VersionConflict { .. })
                    if attempt < MAX_SAVE_ATTEMPTS =>
                {
                    tracing::warn!(%restaurant_id, attempt, "retrying review update after version conflict");
                }
                Err(error) => return Err(map_store_error(error)),
            }
        }

        Err(Error::internal("review save retries exhausted"))
    }

    /// Remove a review from a restaurant.
    ///
    /// Only the original author may delete; there is no time-window check.
    pub async fn delete_review(
        &self,
        author: &User,
        restaurant_id: &Uuid,
        review_id: &Uuid,
    ) -> Result<(), Error> {
        for attempt in 1..=MAX_SAVE_ATTEMPTS {
            let mut restaurant = self.load_restaurant(restaurant_id).await?;

            let existing = restaurant
                .review(review_id)
                .ok_or_else(|| Error::review_not_allowed("review does not exist"))?;

            if !existing.is_written_by(&author.id) {
                return Err(Error::review_not_allowed(
                    "cannot delete another user's review",
                ));
            }

            restaurant.reviews.retain(|review| review.id != *review_id);
            restaurant.refresh_average_rating();

            match self.store.save(restaurant).await {
                Ok(_) => return Ok(()),
                Err(RestaurantStoreError::VersionConflict { .. })
                    if attempt < MAX_SAVE_ATTEMPTS =>
                {
                    tracing::warn!(%restaurant_id, attempt, "retrying review delete after version conflict");
                }
                Err(error) => return Err(map_store_error(error)),
            }
        }

        Err(Error::internal("review save retries exhausted"))
    }

    /// List a restaurant's reviews as a sorted page.
    pub async fn list_reviews(
        &self,
        restaurant_id: &Uuid,
        sort: ReviewSortKey,
        direction: SortDirection,
        request: PageRequest,
    ) -> Result<Page<Review>, Error> {
        let restaurant = self.load_restaurant(restaurant_id).await?;
        Ok(review_paging::page(
            restaurant.reviews,
            sort,
            direction,
            &request,
        ))
    }

    /// Fetch a single review by id.
    ///
    /// `NotFound` when the restaurant is absent; `Ok(None)` when only the
    /// review is.
    pub async fn get_review(
        &self,
        restaurant_id: &Uuid,
        review_id: &Uuid,
    ) -> Result<Option<Review>, Error> {
        let restaurant = self.load_restaurant(restaurant_id).await?;
        Ok(restaurant.review(review_id).cloned())
    }
}

#[cfg(test)]
#[path = "review_service_tests.rs"]
mod tests;
