//! Site tables: the GPS-tagged table used for lookups and the raw Lambert-93
//! table it is generated from.
//!
//! GPS table (canonical): space-delimited, no header,
//! `operator_code lon lat has_2g has_3g has_4g`. Flags are written as
//! `true`/`false`; `1`/`0` is accepted when reading.
//!
//! Raw table: `;`-delimited with a header row,
//! `operator_code;x;y;2g;3g;4g`, Lambert-93 meters, flags as `1`.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use tracing::{info, warn};

use super::source::{self, csv_error};
use crate::error::TableError;
use crate::models::{GeoPoint, LambertSite, Site};

const GPS_COLUMNS: usize = 6;

fn parse_flag(token: &str) -> Option<bool> {
    if token == "1" || token.eq_ignore_ascii_case("true") {
        Some(true)
    } else if token == "0" || token.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_gps_record(record: &StringRecord) -> Result<Site, String> {
    if record.len() != GPS_COLUMNS {
        return Err(format!(
            "expected {} columns, found {}",
            GPS_COLUMNS,
            record.len()
        ));
    }

    let coordinate = |idx: usize, name: &str| -> Result<f64, String> {
        record[idx]
            .parse::<f64>()
            .map_err(|_| format!("invalid {} {:?}", name, &record[idx]))
    };
    let flag = |idx: usize, name: &str| -> Result<bool, String> {
        parse_flag(&record[idx]).ok_or_else(|| format!("invalid {} flag {:?}", name, &record[idx]))
    };

    let operator_code = &record[0];
    if operator_code.is_empty() {
        return Err("empty operator code".to_string());
    }

    Ok(Site {
        operator_code: operator_code.to_string(),
        location: GeoPoint::new(coordinate(1, "longitude")?, coordinate(2, "latitude")?),
        supports_2g: flag(3, "2g")?,
        supports_3g: flag(4, "3g")?,
        supports_4g: flag(5, "4g")?,
    })
}

/// Load the GPS-tagged site table. Any malformed row fails the whole load.
pub fn read_sites(path: &Path) -> Result<Vec<Site>, TableError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source::open(path)?);

    let mut sites = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        let line = record.position().map(|p| p.line());
        let site = parse_gps_record(&record).map_err(|reason| TableError::format(path, line, reason))?;
        sites.push(site);
    }

    if sites.is_empty() {
        return Err(TableError::format(path, None, "no site records"));
    }

    info!("Loaded {} sites from {}", sites.len(), path.display());
    Ok(sites)
}

/// Write sites in the canonical GPS table encoding
pub fn write_sites(path: &Path, sites: &[Site]) -> Result<(), TableError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .from_writer(source::create(path)?);

    for site in sites {
        writer
            .write_record([
                site.operator_code.clone(),
                site.location.lon.to_string(),
                site.location.lat.to_string(),
                site.supports_2g.to_string(),
                site.supports_3g.to_string(),
                site.supports_4g.to_string(),
            ])
            .map_err(|e| csv_error(path, e))?;
    }

    let io_error = |source| TableError::Io {
        path: path.to_path_buf(),
        source,
    };
    writer
        .into_inner()
        .map_err(|e| io_error(e.into_error()))?
        .finish()
        .map_err(io_error)?;

    info!("Wrote {} sites to {}", sites.len(), path.display());
    Ok(())
}

fn parse_lambert_record(record: &StringRecord) -> Option<LambertSite> {
    if record.len() < GPS_COLUMNS {
        return None;
    }

    Some(LambertSite {
        operator_code: record[0].to_string(),
        x: record[1].parse().ok()?,
        y: record[2].parse().ok()?,
        supports_2g: &record[3] == "1",
        supports_3g: &record[4] == "1",
        supports_4g: &record[5] == "1",
    })
}

/// Load the raw Lambert-93 site table. Unparsable rows are skipped.
pub fn read_lambert_sites(path: &Path) -> Result<Vec<LambertSite>, TableError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b';')
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source::open(path)?);

    let mut sites = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) if e.is_io_error() => return Err(csv_error(path, e)),
            Err(e) => {
                warn!("Skipping unreadable row in {}: {}", path.display(), e);
                skipped += 1;
                continue;
            }
        };

        match parse_lambert_record(&record) {
            Some(site) => sites.push(site),
            None => {
                warn!(
                    "Skipping row {} of {}: {:?}",
                    record.position().map(|p| p.line()).unwrap_or_default(),
                    path.display(),
                    record
                );
                skipped += 1;
            }
        }
    }

    info!(
        "Loaded {} raw sites from {} ({} rows skipped)",
        sites.len(),
        path.display(),
        skipped
    );
    Ok(sites)
}
