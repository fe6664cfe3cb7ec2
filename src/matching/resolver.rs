//! Operator code -> brand name resolution.

use hashbrown::HashMap;
use tracing::debug;

use crate::error::UnknownOperator;
use crate::models::OperatorCodeEntry;

/// Lookup table from operator code ("20801") to brand name ("Orange")
#[derive(Debug, Clone, Default)]
pub struct OperatorResolver {
    brands: HashMap<String, String>,
}

impl OperatorResolver {
    /// Build the table from reference entries.
    ///
    /// When two entries share a code, the later one wins.
    pub fn new(entries: &[OperatorCodeEntry]) -> Self {
        let mut brands = HashMap::with_capacity(entries.len());

        for entry in entries {
            let code = entry.operator_code();
            if let Some(previous) = brands.insert(code, entry.brand_name.clone()) {
                debug!(
                    "Operator code {} listed twice, {:?} replaces {:?}",
                    entry.operator_code(),
                    entry.brand_name,
                    previous
                );
            }
        }

        Self { brands }
    }

    pub fn resolve(&self, operator_code: &str) -> Result<&str, UnknownOperator> {
        self.brands
            .get(operator_code)
            .map(String::as_str)
            .ok_or_else(|| UnknownOperator(operator_code.to_string()))
    }

    pub fn len(&self) -> usize {
        self.brands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(mcc: u16, mnc: u16, brand: &str) -> OperatorCodeEntry {
        OperatorCodeEntry {
            country_code: mcc,
            network_code: mnc,
            brand_name: brand.to_string(),
        }
    }

    fn french_resolver() -> OperatorResolver {
        OperatorResolver::new(&[
            entry(208, 1, "Orange"),
            entry(208, 9, "SFR"),
            entry(208, 98, "Air France"),
        ])
    }

    #[test]
    fn test_resolve_known_codes() {
        let resolver = french_resolver();
        assert_eq!(resolver.resolve("20801"), Ok("Orange"));
        assert_eq!(resolver.resolve("20809"), Ok("SFR"));
        assert_eq!(resolver.resolve("20898"), Ok("Air France"));
        assert_eq!(resolver.len(), 3);
    }

    #[test]
    fn test_resolve_unknown_code() {
        let err = french_resolver().resolve("20847").unwrap_err();
        assert_eq!(err, UnknownOperator("20847".to_string()));
        assert!(err.to_string().contains("20847"));
    }

    #[test]
    fn test_unpadded_code_is_unknown() {
        assert!(french_resolver().resolve("2081").is_err());
    }

    #[test]
    fn test_duplicate_code_last_entry_wins() {
        let resolver = OperatorResolver::new(&[
            entry(208, 10, "SFR"),
            entry(208, 1, "Orange"),
            entry(208, 10, "SFR Business"),
        ]);
        assert_eq!(resolver.resolve("20810"), Ok("SFR Business"));
        assert_eq!(resolver.len(), 2);
    }

    #[test]
    fn test_empty_table() {
        let resolver = OperatorResolver::new(&[]);
        assert!(resolver.is_empty());
        assert!(resolver.resolve("20801").is_err());
    }
}
