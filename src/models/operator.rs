use serde::{Deserialize, Serialize};

/// One row of the mobile network code reference table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorCodeEntry {
    /// Mobile country code (MCC), e.g. 208 for France
    pub country_code: u16,
    /// Mobile network code (MNC)
    pub network_code: u16,
    pub brand_name: String,
}

impl OperatorCodeEntry {
    /// Operator identifier as it appears in the site table: MCC followed by a zero-padded MNC
    pub fn operator_code(&self) -> String {
        format!("{}{:02}", self.country_code, self.network_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_code_pads_network() {
        let entry = OperatorCodeEntry {
            country_code: 208,
            network_code: 1,
            brand_name: "Orange".to_string(),
        };
        assert_eq!(entry.operator_code(), "20801");

        let entry = OperatorCodeEntry {
            country_code: 208,
            network_code: 98,
            brand_name: "Air France".to_string(),
        };
        assert_eq!(entry.operator_code(), "20898");
    }
}
