//! Mobile network code reference table: `mcc,mnc,brand` with a header row.

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::info;

use super::source::{self, csv_error};
use crate::error::TableError;
use crate::models::OperatorCodeEntry;

/// Load operator code entries. Any unparsable row fails the whole load.
pub fn read_operator_codes(path: &Path) -> Result<Vec<OperatorCodeEntry>, TableError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source::open(path)?);

    let mut entries = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        let line = record.position().map(|p| p.line());

        if record.len() < 3 {
            return Err(TableError::format(
                path,
                line,
                format!("expected 3 columns, found {}", record.len()),
            ));
        }

        let country_code = record[0]
            .parse::<u16>()
            .map_err(|_| TableError::format(path, line, format!("invalid mcc {:?}", &record[0])))?;
        let network_code = record[1]
            .parse::<u16>()
            .map_err(|_| TableError::format(path, line, format!("invalid mnc {:?}", &record[1])))?;

        entries.push(OperatorCodeEntry {
            country_code,
            network_code,
            brand_name: record[2].to_string(),
        });
    }

    if entries.is_empty() {
        return Err(TableError::format(path, None, "no operator code records"));
    }

    info!("Loaded {} operator codes from {}", entries.len(), path.display());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<Vec<OperatorCodeEntry>, TableError> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mnc.csv");
        fs::write(&path, content).unwrap();
        read_operator_codes(&path)
    }

    #[test]
    fn test_read_operator_codes() {
        let entries = load(
            "MCC,MNC,Brand\n\
             208,1,Orange\n\
             208,09,SFR\n\
             208,98,\"Air France\"\n",
        )
        .unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].network_code, 9);
        assert_eq!(
            entries.last(),
            Some(&OperatorCodeEntry {
                country_code: 208,
                network_code: 98,
                brand_name: "Air France".to_string(),
            })
        );
    }

    #[test]
    fn test_brand_with_comma_is_quoted() {
        let entries = load("mcc,mnc,brand\n208,15,\"Free Mobile, Iliad\"\n").unwrap();
        assert_eq!(entries[0].brand_name, "Free Mobile, Iliad");
    }

    #[test]
    fn test_empty_and_header_only_fail() {
        assert!(matches!(load(""), Err(TableError::Format { .. })));
        assert!(matches!(load("mcc,mnc,brand\n"), Err(TableError::Format { .. })));
    }

    #[test]
    fn test_non_numeric_code_fails() {
        match load("mcc,mnc,brand\n208,1,Orange\n208,xx,Bouygues\n") {
            Err(TableError::Format { line, reason, .. }) => {
                assert_eq!(line, Some(3));
                assert!(reason.contains("mnc"));
            }
            other => panic!("expected format error, got {:?}", other),
        }
    }
}
