//! Domain layer containing the data model and collaborator contracts.
//!
//! # Architecture
//!
//! - [`cache_key`] - Deterministic cache key derivation
//! - [`entities`] - Location records and resolution results
//! - [`repositories`] - Cache store and upstream provider traits
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. The cache-aside logic itself lives in
//! [`crate::application::services::LocationService`].

pub mod cache_key;
pub mod entities;
pub mod repositories;
