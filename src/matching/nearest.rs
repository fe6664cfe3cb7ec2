//! Single-pass nearest candidate selection.

use super::distance;
use crate::models::GeoPoint;

/// Return the candidate closest to `target`, along with its distance in meters.
///
/// `candidates` is walked exactly once. Ties keep the earliest candidate.
/// An empty sequence yields `None`.
pub fn nearest_with_distance<T, I, F>(target: GeoPoint, candidates: I, extract: F) -> Option<(T, f64)>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> GeoPoint,
{
    let mut best: Option<(T, f64)> = None;

    for candidate in candidates {
        let d = distance(target, extract(&candidate));
        let closer = best
            .as_ref()
            .map_or(true, |(_, best_distance)| d < *best_distance);
        if closer {
            best = Some((candidate, d));
        }
    }

    best
}

/// Return the candidate closest to `target`, or `None` when there are no candidates
pub fn nearest<T, I, F>(target: GeoPoint, candidates: I, extract: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> GeoPoint,
{
    nearest_with_distance(target, candidates, extract).map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::EARTH_RADIUS_M;

    const RUE_LA_FAYETTE: (f64, f64) = (2.334332, 48.873258);
    const RUE_HALEVY: (f64, f64) = (2.333123, 48.872321);
    const PLACE_OPERA: (f64, f64) = (2.331972, 48.871423);
    const BOULEVARD_CAPUCINES: (f64, f64) = (2.328364, 48.870152);

    /// Point on the equator `meters` east of null island
    fn east_of_origin(meters: f64) -> GeoPoint {
        GeoPoint::new((meters / EARTH_RADIUS_M).to_degrees(), 0.0)
    }

    #[test]
    fn test_nearest_paris_addresses() {
        let found = nearest(
            BOULEVARD_CAPUCINES.into(),
            [RUE_HALEVY, RUE_LA_FAYETTE, PLACE_OPERA],
            |&p| p.into(),
        );
        assert_eq!(found, Some(PLACE_OPERA));
    }

    #[test]
    fn test_nearest_picks_smallest_distance() {
        let candidates = vec![("A", 5.0), ("B", 1.0), ("C", 3.0)];
        let found = nearest(GeoPoint::new(0.0, 0.0), candidates, |(_, m)| east_of_origin(*m));
        assert_eq!(found.map(|(name, _)| name), Some("B"));
    }

    #[test]
    fn test_nearest_empty_is_none() {
        let found = nearest(GeoPoint::new(0.0, 0.0), Vec::<GeoPoint>::new(), |p| *p);
        assert!(found.is_none());
    }

    #[test]
    fn test_ties_keep_first() {
        let candidates = vec![("first", 100.0), ("second", 100.0), ("far", 200.0)];
        let found = nearest(GeoPoint::new(0.0, 0.0), candidates, |(_, m)| east_of_origin(*m));
        assert_eq!(found.map(|(name, _)| name), Some("first"));
    }

    #[test]
    fn test_consumes_single_pass_iterator() {
        let target = GeoPoint::new(0.0, 0.0);
        let lazy = (1..=5).rev().map(|k| east_of_origin(k as f64 * 1000.0));

        let (point, d) = nearest_with_distance(target, lazy, |p| *p).unwrap();
        assert_eq!(point, east_of_origin(1000.0));
        assert!((d - 1000.0).abs() < 1e-6);
    }
}
