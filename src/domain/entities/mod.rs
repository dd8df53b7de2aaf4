//! Core domain entities.
//!
//! - [`LocationRecord`] - A single geocoded place
//! - [`ResolutionResult`] - The locations for one query plus the cache-hit flag

pub mod location;

pub use location::{LocationRecord, ResolutionResult};
