//! Free-text address -> coordinate resolution.

mod address_api;

use std::future::Future;

use serde::Serialize;

pub use address_api::{first_match, parse_response, AddressApiClient, FeatureCollection, DEFAULT_ENDPOINT};

use crate::error::GeocodeError;
use crate::models::GeoPoint;

/// Best match for a free-text search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geocoded {
    pub position: GeoPoint,
    /// Normalized address label, when the geocoder provides one
    pub label: Option<String>,
}

/// Anything that can turn a search string into a starting point.
///
/// "No results" and an unusable upstream response are both errors.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, query: &str) -> impl Future<Output = Result<Geocoded, GeocodeError>> + Send;
}
