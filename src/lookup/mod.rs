//! End-to-end coverage lookup for one query.

mod answer;
mod service;

pub use answer::{CoverageAnswer, OperatorCoverage, QueryMode, SiteSummary};
pub use service::{LookupOptions, LookupService};
