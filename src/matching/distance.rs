use crate::models::GeoPoint;

/// Mean Earth radius used for all distances (meters)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters between two points (haversine).
///
/// Inputs are not validated; out-of-range coordinates still yield a finite distance.
pub fn distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6 * b.abs().max(1.0)
    }

    #[test]
    fn test_identical_points() {
        let p = GeoPoint::new(2.334332, 48.873258);
        assert_eq!(distance(p, p), 0.0);
        assert_eq!(distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_quarter_great_circle() {
        let origin = GeoPoint::new(0.0, 0.0);
        assert!(approx_eq(
            distance(origin, GeoPoint::new(90.0, 0.0)),
            FRAC_PI_2 * EARTH_RADIUS_M
        ));
        assert!(approx_eq(
            distance(origin, GeoPoint::new(-90.0, 23.12)),
            FRAC_PI_2 * EARTH_RADIUS_M
        ));
        assert!(approx_eq(
            distance(origin, GeoPoint::new(-45.0, 0.0)),
            FRAC_PI_4 * EARTH_RADIUS_M
        ));
    }

    #[test]
    fn test_symmetric() {
        let a = GeoPoint::new(2.328364, 48.870152);
        let b = GeoPoint::new(-5.0888561, 48.4565745);
        assert!((distance(a, b) - distance(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_latitude_does_not_fail() {
        let d = distance(GeoPoint::new(0.0, -90.0), GeoPoint::new(0.0, 135.0));
        assert!(d.is_finite());
        assert!(d >= 0.0 && d <= PI * EARTH_RADIUS_M + 1.0);
    }

    #[test]
    fn test_short_distance_in_paris() {
        // 8 rue La Fayette -> 28 boulevard des Capucines, roughly 500 m apart
        let d = distance(
            GeoPoint::new(2.334332, 48.873258),
            GeoPoint::new(2.328364, 48.870152),
        );
        assert!(d > 450.0 && d < 600.0, "got {d}");
    }
}
