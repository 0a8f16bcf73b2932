//! Domain primitives, aggregates, and services.
//!
//! Purpose: hold the restaurant/review consistency engine (the aggregate
//! types, the business-rule services, and the ports they depend on) free of
//! transport and persistence concerns. Inbound and outbound adapters depend
//! on this module, never the other way around.

pub mod error;
pub mod ports;
pub mod rating;
pub mod restaurant_service;
pub mod restaurants;
pub mod review_paging;
pub mod review_service;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::restaurant_service::{
    RestaurantCreateUpdateRequest, RestaurantSearchRequest, RestaurantService,
};
pub use self::restaurants::{
    Address, GeoPoint, OperatingHours, Photo, REVIEW_EDIT_WINDOW_HOURS, Restaurant, Review,
    TimeRange,
};
pub use self::review_paging::{ReviewSortKey, SortDirection, UnknownSortInput};
pub use self::review_service::{ReviewCreateUpdateRequest, ReviewService};
pub use self::user::{User, UserId, UserValidationError};

/// Convenient domain result alias.
pub type ApiResult<T> = Result<T, Error>;
