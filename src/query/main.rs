//! Query server for coverage lookups.
//!
//! Provides an HTTP API answering, for a free-text address, which cellular
//! sites can serve it, grouped by operator and technology.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cellreach::config::Config;
use cellreach::error::{GeocodeError, LookupError};
use cellreach::geocoder::AddressApiClient;
use cellreach::lookup::{CoverageAnswer, LookupService, QueryMode};
use cellreach::tables::{read_operator_codes, read_sites};

#[derive(Parser, Debug)]
#[command(name = "query")]
#[command(about = "Cellular coverage query server")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (overrides config)
    #[arg(short, long)]
    listen: Option<String>,

    /// GPS-tagged site table (overrides config)
    #[arg(long)]
    sites: Option<PathBuf>,

    /// Operator code table (overrides config)
    #[arg(long)]
    operators: Option<PathBuf>,
}

/// Application state shared across handlers
struct AppState {
    lookup: LookupService,
    geocoder: AddressApiClient,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }
    if let Some(sites) = args.sites {
        config.data.sites = sites;
    }
    if let Some(operators) = args.operators {
        config.data.operators = operators;
    }

    info!("Cellreach Query Server");

    // Tables are loaded once and read-only afterwards; any load error aborts startup
    let sites = read_sites(&config.data.sites).context("Failed to load site table")?;
    let operator_codes =
        read_operator_codes(&config.data.operators).context("Failed to load operator code table")?;

    let lookup = LookupService::new(sites, &operator_codes, config.lookup_options());
    info!(
        "Serving {} sites across {} operators ({} known brands)",
        lookup.site_count(),
        lookup.operator_count(),
        lookup.resolver().len()
    );

    let geocoder = AddressApiClient::new(&config.geocoder.url, config.geocoder.timeout())
        .context("Failed to create geocoder client")?;
    info!("Geocoding with {}", config.geocoder.url);

    let state = Arc::new(AppState { lookup, geocoder });

    // Build router
    let app = Router::new()
        .route("/", get(coverage_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        sites: state.lookup.site_count(),
        operators: state.lookup.operator_count(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    sites: usize,
    operators: usize,
}

/// Coverage lookup for a free-text address
async fn coverage_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CoverageQueryParams>,
) -> Result<Json<CoverageAnswer>, (StatusCode, Json<ErrorResponse>)> {
    let mode = params.mode.unwrap_or_default();

    let answer = state
        .lookup
        .lookup(&state.geocoder, &params.search, mode)
        .await
        .map_err(|e| {
            tracing::error!("Lookup for {:?} failed: {}", params.search, e);
            let status = match &e {
                e if e.is_bad_search() => StatusCode::BAD_REQUEST,
                LookupError::Geocode(GeocodeError::NoMatch(_)) => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_GATEWAY,
            };
            (status, Json(ErrorResponse { error: e.to_string() }))
        })?;

    Ok(Json(answer))
}

#[derive(Deserialize)]
struct CoverageQueryParams {
    /// Free-text address
    search: String,
    /// "reachable" (default), "nearest" or "closest"
    mode: Option<QueryMode>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}
