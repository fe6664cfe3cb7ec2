//! Reference table ingestion (site tables and operator codes).

mod operators;
mod sites;
mod source;

pub use operators::read_operator_codes;
pub use sites::{read_lambert_sites, read_sites, write_sites};
