//! Client for the French national address API (BAN).
//!
//! `GET <endpoint>?q=<search>&limit=1` returns a GeoJSON FeatureCollection;
//! the first feature is taken as the query position.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{Geocoded, Geocoder};
use crate::error::GeocodeError;
use crate::models::GeoPoint;

pub const DEFAULT_ENDPOINT: &str = "https://api-adresse.data.gouv.fr/search/";

#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Properties,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// [lon, lat]
    pub coordinates: [f64; 2],
}

#[derive(Debug, Default, Deserialize)]
pub struct Properties {
    pub label: Option<String>,
    pub score: Option<f64>,
}

/// Parse a raw API response body
pub fn parse_response(body: &str) -> Result<FeatureCollection, GeocodeError> {
    Ok(serde_json::from_str(body)?)
}

/// Take the first feature of a response as the geocoded position
pub fn first_match(collection: FeatureCollection, query: &str) -> Result<Geocoded, GeocodeError> {
    let feature = collection
        .features
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeError::NoMatch(query.to_string()))?;

    let [lon, lat] = feature.geometry.coordinates;
    Ok(Geocoded {
        position: GeoPoint::new(lon, lat),
        label: feature.properties.label,
    })
}

/// HTTP geocoder backed by the address API
#[derive(Clone)]
pub struct AddressApiClient {
    client: Client,
    endpoint: Url,
}

impl AddressApiClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .user_agent(concat!("cellreach/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Self::with_client(client, endpoint)
    }

    /// Use an already configured HTTP client
    pub fn with_client(client: Client, endpoint: &str) -> Result<Self, GeocodeError> {
        Ok(Self {
            client,
            endpoint: Url::parse(endpoint)?,
        })
    }

    fn search_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", "1");
        url
    }

    /// Fetch the raw response body for a search
    pub async fn request(&self, query: &str) -> Result<String, GeocodeError> {
        let url = self.search_url(query);
        debug!("Geocoding request: {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(GeocodeError::Status(response.status()));
        }

        Ok(response.text().await?)
    }
}

impl Geocoder for AddressApiClient {
    async fn geocode(&self, query: &str) -> Result<Geocoded, GeocodeError> {
        let body = self.request(query).await?;
        first_match(parse_response(&body)?, query)
    }
}
