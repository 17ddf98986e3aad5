//! Outbound service clients that are allowed to fail.

pub mod geo;

pub use geo::GeoClient;
