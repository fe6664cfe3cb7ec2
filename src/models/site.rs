//! Cellular site records and the geographic point type they are located by.

use serde::{Deserialize, Serialize};

/// Geographic point in decimal degrees (lon/lat order, like GeoJSON)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

/// Radio technology generation a site can serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Technology {
    #[serde(rename = "2g")]
    G2,
    #[serde(rename = "3g")]
    G3,
    #[serde(rename = "4g")]
    G4,
}

impl Technology {
    /// All technologies in bucket order
    pub fn all() -> &'static [Technology] {
        &[Technology::G2, Technology::G3, Technology::G4]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Technology::G2 => "2g",
            Technology::G3 => "3g",
            Technology::G4 => "4g",
        }
    }
}

impl std::fmt::Display for Technology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A cellular site from the GPS-tagged reference table.
///
/// Sites are built once at load time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Raw operator identifier: country code followed by 2-digit network code (e.g. "20801")
    pub operator_code: String,
    pub location: GeoPoint,
    pub supports_2g: bool,
    pub supports_3g: bool,
    pub supports_4g: bool,
}

impl Site {
    /// Whether the site declares support for `technology`
    pub fn supports(&self, technology: Technology) -> bool {
        match technology {
            Technology::G2 => self.supports_2g,
            Technology::G3 => self.supports_3g,
            Technology::G4 => self.supports_4g,
        }
    }
}

/// A site from the raw table, positioned on the Lambert-93 grid (meters)
#[derive(Debug, Clone, PartialEq)]
pub struct LambertSite {
    pub operator_code: String,
    pub x: i64,
    pub y: i64,
    pub supports_2g: bool,
    pub supports_3g: bool,
    pub supports_4g: bool,
}

impl LambertSite {
    /// Reproject onto WGS84, keeping every other field
    pub fn to_gps(&self) -> Site {
        Site {
            operator_code: self.operator_code.clone(),
            location: crate::projection::lambert93_to_wgs84(self.x as f64, self.y as f64),
            supports_2g: self.supports_2g,
            supports_3g: self.supports_3g,
            supports_4g: self.supports_4g,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supports_matches_flags() {
        let site = Site {
            operator_code: "20810".to_string(),
            location: GeoPoint::new(2.0, 48.0),
            supports_2g: true,
            supports_3g: false,
            supports_4g: true,
        };

        assert!(site.supports(Technology::G2));
        assert!(!site.supports(Technology::G3));
        assert!(site.supports(Technology::G4));
    }

    #[test]
    fn test_technology_serializes_as_label() {
        let json = serde_json::to_string(&Technology::all()).unwrap();
        assert_eq!(json, r#"["2g","3g","4g"]"#);
    }

    #[test]
    fn test_lambert_site_to_gps() {
        let raw = LambertSite {
            operator_code: "20801".to_string(),
            x: 102980,
            y: 6847973,
            supports_2g: true,
            supports_3g: true,
            supports_4g: false,
        };

        let site = raw.to_gps();
        assert_eq!(site.operator_code, "20801");
        assert!((site.location.lon - -5.0888561).abs() < 1e-6);
        assert!((site.location.lat - 48.4565745).abs() < 1e-6);
        assert!(site.supports_3g && !site.supports_4g);
    }
}
