//! Document library server - standalone HTTP server for the library store
//!
//! Configuration comes from the environment (a `.env` file is honored) or a
//! TOML file given with `--config`; `--host` and `--port` override either.

mod config;

use anyhow::{Context, Result};
use axum::{extract::State, http::HeaderValue, response::Json, routing::get, Router};
use clap::Parser;
use doclib::routes::{self, ApiState};
use doclib::services::StatsService;
use doclib::source::StaticSource;
use doclib::LibraryStore;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "doclib-server", version, about = "Document library HTTP server")]
struct Args {
    /// TOML configuration file; environment variables are ignored when set
    #[arg(long, env = "DOCLIB_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doclib_server=info,doclib=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    info!("Starting document library server on {}:{}", config.host, config.port);

    let store = LibraryStore::new(config.library.clone());
    let mut state = ApiState::new(store);
    if let Some(manifest) = &config.drive_manifest {
        let source = StaticSource::from_json_file(manifest).await?;
        info!("Loaded Drive manifest from {}", manifest);
        state = state.with_source(Arc::new(source));
    }

    let app = build_router(state, &config);

    let addr = SocketAddr::new(
        config
            .host
            .parse()
            .with_context(|| format!("Invalid host address: {}", config.host))?,
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: ApiState, config: &Config) -> Router {
    let origins: Vec<HeaderValue> = config
        .allowed_origins()
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let public_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .with_state(state.store.clone());

    Router::new()
        .merge(public_routes)
        .merge(routes::configure(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn root() -> &'static str {
    "Document Library Server"
}

async fn health_check(State(store): State<LibraryStore>) -> Json<serde_json::Value> {
    let stats = StatsService::new(store).stats().await;
    Json(serde_json::json!({
        "status": "healthy",
        "documents": stats.approved_documents,
        "pending": stats.pending_documents,
        "folders": stats.folders,
        "version": env!("CARGO_PKG_VERSION")
    }))
}
