//! Lambert-93 (EPSG:2154) to WGS84 conversion.
//!
//! Inverse Lambert Conformal Conic with two standard parallels on the GRS80
//! ellipsoid. The RGF93 -> WGS84 datum shift is null, so the geographic
//! coordinates are used as-is.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::models::GeoPoint;

/// GRS80 semi-major axis (meters)
const SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
/// GRS80 inverse flattening
const INVERSE_FLATTENING: f64 = 298.257_222_101;

const STANDARD_PARALLEL_1: f64 = 49.0;
const STANDARD_PARALLEL_2: f64 = 44.0;
const ORIGIN_LATITUDE: f64 = 46.5;
const CENTRAL_MERIDIAN: f64 = 3.0;
const FALSE_EASTING: f64 = 700_000.0;
const FALSE_NORTHING: f64 = 6_600_000.0;

const LATITUDE_TOLERANCE: f64 = 1e-12;
const MAX_ITERATIONS: usize = 32;

struct ConicParams {
    e: f64,
    n: f64,
    /// a * F
    scale: f64,
    rho0: f64,
}

fn eccentricity() -> f64 {
    let f = 1.0 / INVERSE_FLATTENING;
    (2.0 * f - f * f).sqrt()
}

fn m(phi: f64, e: f64) -> f64 {
    phi.cos() / (1.0 - (e * phi.sin()).powi(2)).sqrt()
}

fn t(phi: f64, e: f64) -> f64 {
    let es = e * phi.sin();
    (FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - es) / (1.0 + es)).powf(e / 2.0)
}

fn conic_params() -> ConicParams {
    let e = eccentricity();
    let phi1 = STANDARD_PARALLEL_1.to_radians();
    let phi2 = STANDARD_PARALLEL_2.to_radians();
    let phi0 = ORIGIN_LATITUDE.to_radians();

    let n = (m(phi1, e).ln() - m(phi2, e).ln()) / (t(phi1, e).ln() - t(phi2, e).ln());
    let scale = SEMI_MAJOR_AXIS * m(phi1, e) / (n * t(phi1, e).powf(n));
    let rho0 = scale * t(phi0, e).powf(n);

    ConicParams { e, n, scale, rho0 }
}

/// Convert a Lambert-93 grid position (meters) to WGS84 longitude/latitude (degrees)
pub fn lambert93_to_wgs84(x: f64, y: f64) -> GeoPoint {
    let ConicParams { e, n, scale, rho0 } = conic_params();

    let dx = x - FALSE_EASTING;
    let dy = rho0 - (y - FALSE_NORTHING);
    let rho = dx.hypot(dy);
    let t_value = (rho / scale).powf(1.0 / n);
    let theta = dx.atan2(dy);

    let lon = theta / n + CENTRAL_MERIDIAN.to_radians();

    // Isometric latitude inversion by fixed-point iteration
    let mut phi = FRAC_PI_2 - 2.0 * t_value.atan();
    for _ in 0..MAX_ITERATIONS {
        let es = e * phi.sin();
        let next = FRAC_PI_2 - 2.0 * (t_value * ((1.0 - es) / (1.0 + es)).powf(e / 2.0)).atan();
        let delta = (next - phi).abs();
        phi = next;
        if delta < LATITUDE_TOLERANCE {
            break;
        }
    }

    GeoPoint::new(lon.to_degrees(), phi.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: GeoPoint, lon: f64, lat: f64) {
        assert!(
            (actual.lon - lon).abs() < 1e-6 && (actual.lat - lat).abs() < 1e-6,
            "expected ({lon}, {lat}), got ({}, {})",
            actual.lon,
            actual.lat
        );
    }

    #[test]
    fn test_reference_point_brittany() {
        assert_close(lambert93_to_wgs84(102980.0, 6847973.0), -5.0888561, 48.4565745);
    }

    #[test]
    fn test_projection_origin() {
        // False origin maps back onto the central meridian and origin latitude
        assert_close(
            lambert93_to_wgs84(FALSE_EASTING, FALSE_NORTHING),
            CENTRAL_MERIDIAN,
            ORIGIN_LATITUDE,
        );
    }

    #[test]
    fn test_amiens_address() {
        assert_close(lambert93_to_wgs84(648952.58, 6977867.14), 2.290084, 49.897442);
    }

    #[test]
    fn test_corsica() {
        let point = lambert93_to_wgs84(1240585.0, 6154019.0);
        assert!((point.lon - 9.55039).abs() < 1e-4);
        assert!((point.lat - 42.28436).abs() < 1e-4);
    }
}
