//! Site table generation.
//!
//! Converts the raw Lambert-93 site table into the GPS-tagged table the
//! query server loads.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cellreach::models::Site;
use cellreach::tables::{read_lambert_sites, write_sites};

#[derive(Parser, Debug)]
#[command(name = "generate")]
#[command(about = "Convert a Lambert-93 site table to GPS coordinates")]
struct Args {
    /// Raw site table (`;`-delimited, Lambert-93 coordinates)
    #[arg(short, long, default_value = "site_mobiles.csv")]
    input: PathBuf,

    /// GPS-tagged output table
    #[arg(short, long, default_value = "site_mobiles_gps.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Cellreach site table generation");
    info!("Input: {}", args.input.display());

    let raw_sites = read_lambert_sites(&args.input).context("Failed to read raw site table")?;
    if raw_sites.is_empty() {
        anyhow::bail!("No usable rows in {}", args.input.display());
    }

    let pb = ProgressBar::new(raw_sites.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let sites: Vec<Site> = raw_sites
        .par_iter()
        .map(|raw| {
            let site = raw.to_gps();
            pb.inc(1);
            site
        })
        .collect();
    pb.finish_with_message("converted");

    write_sites(&args.output, &sites).context("Failed to write GPS site table")?;
    info!("Output: {} ({} sites)", args.output.display(), sites.len());

    Ok(())
}
