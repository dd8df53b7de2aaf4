//! Application layer services implementing business logic.
//!
//! Services consume the collaborator traits from [`crate::domain::repositories`]
//! and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::location_service::LocationService`] - Cache-aside geocoding search
pub mod services;
