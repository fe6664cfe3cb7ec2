//! Serializable coverage answers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{GeoPoint, Site, Technology};

/// How sites are selected for an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// Every site within its technology's threshold
    #[default]
    Reachable,
    /// The closest site per technology for each operator
    Nearest,
    /// The single closest site of each operator, whatever it supports
    Closest,
}

/// A site as reported to the caller, with its distance to the query position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSummary {
    pub lon: f64,
    pub lat: f64,
    pub distance_m: f64,
    pub has_2g: bool,
    pub has_3g: bool,
    pub has_4g: bool,
}

impl SiteSummary {
    pub fn new(site: &Site, distance_m: f64) -> Self {
        Self {
            lon: site.location.lon,
            lat: site.location.lat,
            distance_m,
            has_2g: site.supports_2g,
            has_3g: site.supports_3g,
            has_4g: site.supports_4g,
        }
    }
}

/// Sites of one operator, bucketed by technology
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatorCoverage {
    /// Raw operator code from the site table
    pub code: String,
    /// Brand name, or the raw code when the operator is not in the reference table
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub technologies: BTreeMap<Technology, Vec<SiteSummary>>,
    /// Closest-mode site
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<SiteSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageAnswer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub position: GeoPoint,
    pub mode: QueryMode,
    pub operators: Vec<OperatorCoverage>,
}

impl CoverageAnswer {
    /// Find an operator's coverage by raw code
    pub fn operator(&self, code: &str) -> Option<&OperatorCoverage> {
        self.operators.iter().find(|o| o.code == code)
    }
}
