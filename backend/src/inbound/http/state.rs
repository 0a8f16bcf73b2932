//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the domain services and remain testable without real I/O
//! behind them.

use std::sync::Arc;

use crate::domain::{RestaurantService, ReviewService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Restaurant management and search dispatch.
    pub restaurants: Arc<RestaurantService>,
    /// Review lifecycle inside restaurant aggregates.
    pub reviews: Arc<ReviewService>,
}

impl HttpState {
    /// Bundle the domain services for handler injection.
    pub fn new(restaurants: Arc<RestaurantService>, reviews: Arc<ReviewService>) -> Self {
        Self {
            restaurants,
            reviews,
        }
    }
}
