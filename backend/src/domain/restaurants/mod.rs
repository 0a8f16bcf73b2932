//! Restaurant aggregate entities and value objects.
//!
//! A [`Restaurant`] together with its embedded [`Review`]s forms one
//! consistency unit: reviews are never addressable outside their owning
//! restaurant, and the aggregate's `average_rating` is recomputed before
//! every persist.

mod address;
mod hours;
mod photo;
mod restaurant;
mod review;

pub use self::address::{Address, GeoPoint};
pub use self::hours::{OperatingHours, TimeRange};
pub use self::photo::Photo;
pub use self::restaurant::Restaurant;
pub use self::review::{REVIEW_EDIT_WINDOW_HOURS, Review};

#[cfg(test)]
mod tests;
