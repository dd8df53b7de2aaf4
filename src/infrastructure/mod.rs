//! Infrastructure layer for external integrations.
//!
//! This layer implements the collaborator traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - Cache backends (Redis and in-process)
//! - [`geocoding`] - Upstream geocoding clients

pub mod cache;
pub mod geocoding;
