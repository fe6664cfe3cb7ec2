//! Per-technology reachability filtering.
//!
//! Linear scan over the site table. A spatial index (grid or R-tree) could
//! replace the scan for much larger tables without changing the result.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use super::distance;
use crate::models::{GeoPoint, Site, Technology};

/// Reachable sites: operator code -> technology -> sites, in input order
pub type ReachabilityResult<'a> = BTreeMap<&'a str, BTreeMap<Technology, Vec<Reached<'a>>>>;

/// A site within range, with its distance to the query position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reached<'a> {
    pub site: &'a Site,
    pub distance_m: f64,
}

/// Maximum serving distance per technology, in meters (exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    #[serde(rename = "2g")]
    pub g2: f64,
    #[serde(rename = "3g")]
    pub g3: f64,
    #[serde(rename = "4g")]
    pub g4: f64,
}

impl Thresholds {
    pub const DEFAULT_2G: f64 = 30_000.0;
    pub const DEFAULT_3G: f64 = 5_000.0;
    pub const DEFAULT_4G: f64 = 10_000.0;

    pub fn get(&self, technology: Technology) -> f64 {
        match technology {
            Technology::G2 => self.g2,
            Technology::G3 => self.g3,
            Technology::G4 => self.g4,
        }
    }

    /// Whether a site at `distance_m` supporting `technology` is in range
    pub fn reaches(&self, technology: Technology, distance_m: f64) -> bool {
        distance_m < self.get(technology)
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            g2: Self::DEFAULT_2G,
            g3: Self::DEFAULT_3G,
            g4: Self::DEFAULT_4G,
        }
    }
}

/// Group every site reachable from `position` by operator then technology.
///
/// A site lands in a technology bucket only if it supports the technology and its
/// distance is strictly below that technology's threshold.
pub fn filter_reachable<'a>(
    position: GeoPoint,
    sites: &'a [Site],
    thresholds: &Thresholds,
) -> ReachabilityResult<'a> {
    let mut result: ReachabilityResult<'a> = BTreeMap::new();

    for site in sites {
        let d = distance(position, site.location);

        for &technology in Technology::all() {
            if site.supports(technology) && thresholds.reaches(technology, d) {
                result
                    .entry(site.operator_code.as_str())
                    .or_default()
                    .entry(technology)
                    .or_default()
                    .push(Reached { site, distance_m: d });
            }
        }
    }

    debug!(
        "Reachability at ({}, {}): {} operators in range",
        position.lon,
        position.lat,
        result.len()
    );

    result
}
