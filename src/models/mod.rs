//! Core data models for the coverage lookup.

pub mod operator;
pub mod site;

pub use operator::OperatorCodeEntry;
pub use site::{GeoPoint, LambertSite, Site, Technology};
