//! Restaurant management
//!
//! Restaurants are plain records; orders only need to know whether one
//! exists (see [`crate::orders::RestaurantDirectory`]).

pub mod service;

pub use service::RestaurantService;
