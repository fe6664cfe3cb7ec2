//! Cellreach - which cellular sites can serve an address
//!
//! This library provides the matching engine and shared types for the query and generate binaries.

pub mod config;
pub mod error;
pub mod geocoder;
pub mod lookup;
pub mod matching;
pub mod models;
pub mod projection;
pub mod tables;

pub use models::{GeoPoint, OperatorCodeEntry, Site, Technology};
