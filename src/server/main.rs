//! HTTP server for neighborhood lookups.
//!
//! Loads the street table once at startup and serves lookups from the
//! shared, read-only index.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use neighborhood::config::Config;
use neighborhood::{load_index, NeighborhoodSummary, StreetIndex};

/// Body served on `/sf/district`, which is not wired to the index.
const DISTRICT_PLACEHOLDER: &str = "Hello from a HandleFunc #1!\n";

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Neighborhood lookup server")]
struct Args {
    /// Listen address
    #[arg(short, long)]
    listen: Option<String>,

    /// Port to listen on, keeping the host of the listen address
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Street table (plain or gzip-compressed TSV)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Optional TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Application state shared across handlers
struct AppState {
    index: StreetIndex,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }
    if let Some(port) = args.port {
        config = config.with_port(port);
    }
    if let Some(data) = args.data {
        config.data.path = data;
    }

    info!("Neighborhood Lookup Server");

    let index = load_index(&config.data.path).with_context(|| {
        format!(
            "Failed to load street data from {}",
            config.data.path.display()
        )
    })?;

    let state = Arc::new(AppState { index });

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/sf", get(address_handler))
        .route("/sf/district", get(district_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    streets: usize,
    records: usize,
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        streets: state.index.street_count(),
        records: state.index.len(),
    })
}

#[derive(Deserialize)]
struct AddressQueryParams {
    /// Free-form street address
    #[serde(default)]
    address: String,
}

/// Neighborhood lookup for a free-form address
async fn address_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AddressQueryParams>,
) -> Json<NeighborhoodSummary> {
    let summary = state.index.find_address(&params.address);
    debug!(
        "Address {:?}: {} districts",
        params.address,
        summary.district.len()
    );
    Json(summary)
}

/// Static placeholder; this route does not consult the index. Lookups are
/// served by `/sf`.
async fn district_handler() -> &'static str {
    DISTRICT_PLACEHOLDER
}

#[cfg(test)]
mod tests {
    use super::*;
    use neighborhood::build_index;

    fn state() -> Arc<AppState> {
        let data = "StreetName\tStreetType\tSideCode\tHouseNumLo\tHouseNumHi\tDistrict\tNeighborhood\n\
                    main\tst\tO\t101\t199\t6\tFinancial District/South Beach\n\
                    10th\tave\tA\t0\t0\t2\tInner Richmond\n\
                    10th\tst\tE\t2\t98\t6\tSouth of Market\n";
        Arc::new(AppState {
            index: build_index(data.as_bytes()).unwrap(),
        })
    }

    fn query(address: &str) -> Query<AddressQueryParams> {
        Query(AddressQueryParams {
            address: address.to_string(),
        })
    }

    #[tokio::test]
    async fn test_address_lookup() {
        let Json(summary) = address_handler(State(state()), query("123 Main St #4")).await;
        assert_eq!(summary.district, vec![6]);
        assert_eq!(
            summary.neighborhood,
            vec!["Financial District/South Beach".to_string()]
        );
    }

    #[tokio::test]
    async fn test_ambiguous_address() {
        let Json(summary) = address_handler(State(state()), query("10 10th Apt 3")).await;
        assert_eq!(summary.district, vec![2, 6]);
        assert_eq!(
            summary.neighborhood,
            vec!["Inner Richmond".to_string(), "South of Market".to_string()]
        );
    }

    #[tokio::test]
    async fn test_unparseable_address_is_empty() {
        for address in ["", " ", "b123 Main St", "1 asdf123 st"] {
            let Json(summary) = address_handler(State(state()), query(address)).await;
            assert!(summary.is_empty(), "{:?}", address);
        }
    }

    #[tokio::test]
    async fn test_district_placeholder() {
        assert_eq!(district_handler().await, DISTRICT_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_health() {
        let Json(health) = health_handler(State(state())).await;
        assert_eq!(health.status, "ok");
        assert_eq!(health.streets, 2);
        assert_eq!(health.records, 3);
    }
}
