//! Persistence adapters for the restaurant store port.

mod memory;

pub use memory::InMemoryRestaurantStore;
