use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a reference table. Loads are all-or-nothing.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed table {}{}: {reason}", .path.display(), .line.map(|l| format!(" (line {l})")).unwrap_or_default())]
    Format {
        path: PathBuf,
        line: Option<u64>,
        reason: String,
    },
}

impl TableError {
    pub(crate) fn format(path: &std::path::Path, line: Option<u64>, reason: impl Into<String>) -> Self {
        TableError::Format {
            path: path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }
}

/// Operator code with no entry in the reference table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown operator code {0}")]
pub struct UnknownOperator(pub String);

/// The geocoder could not produce a starting point for a query
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("could not make http request: {0}")]
    Http(#[from] reqwest::Error),
    #[error("could not make http request: status {0}")]
    Status(reqwest::StatusCode),
    #[error("could not parse response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no address matches {0:?}")]
    NoMatch(String),
    #[error("invalid geocoder url: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("empty search")]
    EmptyQuery,
    #[error("can't find GPS coordinates: {0}")]
    Geocode(#[from] GeocodeError),
}

impl LookupError {
    /// Whether the search text itself was rejected, as opposed to an upstream failure
    pub fn is_bad_search(&self) -> bool {
        match self {
            LookupError::EmptyQuery => true,
            // The address API answers 4xx to searches it cannot accept (e.g. too short)
            LookupError::Geocode(GeocodeError::Status(status)) => status.is_client_error(),
            LookupError::Geocode(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_unknown_operator_names_code() {
        let err = UnknownOperator("20847".to_string());
        assert!(err.to_string().contains("20847"));
    }

    #[test]
    fn test_bad_search_classification() {
        assert!(LookupError::EmptyQuery.is_bad_search());
        assert!(LookupError::Geocode(GeocodeError::Status(reqwest::StatusCode::BAD_REQUEST)).is_bad_search());
        assert!(!LookupError::Geocode(GeocodeError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE))
            .is_bad_search());
        assert!(!LookupError::Geocode(GeocodeError::NoMatch("x".to_string())).is_bad_search());
    }

    #[test]
    fn test_format_error_mentions_line() {
        let err = TableError::format(Path::new("sites.csv"), Some(3), "bad longitude");
        let msg = err.to_string();
        assert!(msg.contains("sites.csv"));
        assert!(msg.contains("line 3"));
        assert!(msg.contains("bad longitude"));

        let err = TableError::format(Path::new("sites.csv"), None, "no records");
        assert!(!err.to_string().contains("line"));
    }
}
