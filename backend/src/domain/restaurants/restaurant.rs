//! Restaurant aggregate root.

use uuid::Uuid;

use crate::domain::rating;
use crate::domain::user::UserId;

use super::{Address, GeoPoint, OperatingHours, Photo, Review};

/// A restaurant record together with its embedded reviews.
///
/// The whole record is persisted as one unit; `average_rating` is derived
/// from the review collection and is refreshed before every persist, never
/// set by callers. `version` is the optimistic concurrency token assigned by
/// the store: a freshly built aggregate carries version `0`, and every
/// successful save moves it forward.
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Cuisine category, free text.
    pub cuisine_type: String,
    /// Phone number or other contact detail.
    pub contact_information: String,
    /// Postal address.
    pub address: Address,
    /// Geocoded coordinates derived from the address.
    pub geo_location: GeoPoint,
    /// Weekly opening times.
    pub operating_hours: OperatingHours,
    /// Mean of all review ratings, `0.0` when there are none.
    pub average_rating: f32,
    /// Photos attached to the restaurant itself.
    pub photos: Vec<Photo>,
    /// Embedded reviews; the aggregate boundary.
    pub reviews: Vec<Review>,
    /// Optimistic concurrency token, storage-assigned.
    pub version: u64,
}

impl Restaurant {
    /// Find an embedded review by id.
    pub fn review(&self, review_id: &Uuid) -> Option<&Review> {
        self.reviews.iter().find(|review| review.id == *review_id)
    }

    /// Whether the given user already has a review on this restaurant.
    pub fn has_review_by(&self, author_id: &UserId) -> bool {
        self.reviews
            .iter()
            .any(|review| review.is_written_by(author_id))
    }

    /// Recompute `average_rating` from the current review collection.
    ///
    /// Must run after every review mutation, before the aggregate is
    /// persisted, so rating-range queries can rely on the stored value.
    pub fn refresh_average_rating(&mut self) {
        self.average_rating = rating::recompute(&self.reviews);
    }
}
