//! Lookup service: geocode, match and resolve operator names.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::answer::{CoverageAnswer, OperatorCoverage, QueryMode, SiteSummary};
use crate::error::LookupError;
use crate::geocoder::Geocoder;
use crate::matching::{filter_reachable, nearest_with_distance, OperatorResolver, Thresholds};
use crate::models::{GeoPoint, OperatorCodeEntry, Site, Technology};

/// Matching parameters fixed for the lifetime of a service
#[derive(Debug, Clone, Copy, Default)]
pub struct LookupOptions {
    pub thresholds: Thresholds,
    /// Nearest- and closest-mode sites at or beyond this distance (meters) are dropped
    pub nearest_max_distance: Option<f64>,
}

/// Read-only site and operator tables plus the matching that runs over them.
///
/// Built once, then shared between concurrent queries without locking.
pub struct LookupService {
    sites: Vec<Site>,
    /// Operator code -> indices into `sites`, for nearest mode
    by_operator: BTreeMap<String, Vec<usize>>,
    resolver: OperatorResolver,
    options: LookupOptions,
}

impl LookupService {
    pub fn new(sites: Vec<Site>, operator_codes: &[OperatorCodeEntry], options: LookupOptions) -> Self {
        let mut by_operator: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (idx, site) in sites.iter().enumerate() {
            by_operator
                .entry(site.operator_code.clone())
                .or_default()
                .push(idx);
        }

        Self {
            sites,
            by_operator,
            resolver: OperatorResolver::new(operator_codes),
            options,
        }
    }

    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    pub fn operator_count(&self) -> usize {
        self.by_operator.len()
    }

    pub fn resolver(&self) -> &OperatorResolver {
        &self.resolver
    }

    /// Geocode `query` and answer for the resulting position
    pub async fn lookup<G: Geocoder>(
        &self,
        geocoder: &G,
        query: &str,
        mode: QueryMode,
    ) -> Result<CoverageAnswer, LookupError> {
        if query.trim().is_empty() {
            return Err(LookupError::EmptyQuery);
        }

        let geocoded = geocoder.geocode(query).await?;
        debug!(
            "Geocoded {:?} to ({}, {})",
            query, geocoded.position.lon, geocoded.position.lat
        );

        let mut answer = self.answer(geocoded.position, mode);
        answer.query = Some(query.to_string());
        answer.label = geocoded.label;
        Ok(answer)
    }

    /// Answer for an already resolved position
    pub fn answer(&self, position: GeoPoint, mode: QueryMode) -> CoverageAnswer {
        let operators = match mode {
            QueryMode::Reachable => self.reachable(position),
            QueryMode::Nearest => self.nearest(position),
            QueryMode::Closest => self.closest(position),
        };

        CoverageAnswer {
            query: None,
            label: None,
            position,
            mode,
            operators,
        }
    }

    fn reachable(&self, position: GeoPoint) -> Vec<OperatorCoverage> {
        filter_reachable(position, &self.sites, &self.options.thresholds)
            .into_iter()
            .map(|(code, buckets)| OperatorCoverage {
                code: code.to_string(),
                name: self.display_name(code),
                technologies: buckets
                    .into_iter()
                    .map(|(technology, sites)| {
                        let summaries = sites
                            .into_iter()
                            .map(|reached| SiteSummary::new(reached.site, reached.distance_m))
                            .collect();
                        (technology, summaries)
                    })
                    .collect(),
                site: None,
            })
            .collect()
    }

    fn nearest(&self, position: GeoPoint) -> Vec<OperatorCoverage> {
        let mut operators = Vec::new();

        for (code, indices) in &self.by_operator {
            let mut technologies = BTreeMap::new();

            for &technology in Technology::all() {
                let candidates = indices
                    .iter()
                    .map(|&idx| &self.sites[idx])
                    .filter(|site| site.supports(technology));

                let Some((site, d)) = nearest_with_distance(position, candidates, |site| site.location) else {
                    continue;
                };

                if self.within_nearest_cap(d) {
                    technologies.insert(technology, vec![SiteSummary::new(site, d)]);
                }
            }

            if !technologies.is_empty() {
                operators.push(OperatorCoverage {
                    code: code.clone(),
                    name: self.display_name(code),
                    technologies,
                    site: None,
                });
            }
        }

        operators
    }

    /// One closest site per operator, whatever technologies it carries
    fn closest(&self, position: GeoPoint) -> Vec<OperatorCoverage> {
        let mut operators = Vec::new();

        for (code, indices) in &self.by_operator {
            let candidates = indices.iter().map(|&idx| &self.sites[idx]);
            let Some((site, d)) = nearest_with_distance(position, candidates, |site| site.location) else {
                continue;
            };

            if self.within_nearest_cap(d) {
                operators.push(OperatorCoverage {
                    code: code.clone(),
                    name: self.display_name(code),
                    technologies: BTreeMap::new(),
                    site: Some(SiteSummary::new(site, d)),
                });
            }
        }

        operators
    }

    fn within_nearest_cap(&self, distance_m: f64) -> bool {
        self.options
            .nearest_max_distance
            .map_or(true, |max| distance_m < max)
    }

    fn display_name(&self, code: &str) -> String {
        match self.resolver.resolve(code) {
            Ok(brand) => brand.to_string(),
            Err(e) => {
                warn!("{}, falling back to raw code", e);
                code.to_string()
            }
        }
    }
}
