//! Business logic services for the application layer.

pub mod location_service;

pub use location_service::{LocationService, ResolveError};
