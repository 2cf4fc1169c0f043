//! Shared types for the aeronav flight-navigation engine.
//!
//! - [`FlightPath`] - An ordered sequence of grid cells with world waypoints
//! - [`SearchConfig`] and [`Connectivity`] - Pathfinding search parameters
//! - [`NavError`] - The error type shared across the navigation crates

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod error;
pub mod path;

pub use config::{Connectivity, SearchConfig};
pub use error::NavError;
pub use path::FlightPath;
