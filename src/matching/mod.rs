//! Geospatial matching engine.
//!
//! Pure, synchronous functions over read-only site and operator tables:
//! haversine distance, nearest-candidate selection, per-technology
//! reachability and operator brand resolution.

mod distance;
mod nearest;
mod reachability;
mod resolver;

pub use distance::{distance, EARTH_RADIUS_M};
pub use nearest::{nearest, nearest_with_distance};
pub use reachability::{filter_reachable, Reached, ReachabilityResult, Thresholds};
pub use resolver::OperatorResolver;
