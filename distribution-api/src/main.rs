//! Distribution Dashboard API Server
//!
//! HTTP API that serves market-implied probability distributions derived
//! from archived prediction-market trade data.

mod routes;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, Method};
use axum::Router;
use distribution_services::{default_sources, DistributionService, DistributionTable};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DistributionService>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,distribution_api=debug")),
        )
        .init();

    info!("Starting Distribution Dashboard API");

    let data_dir = PathBuf::from(
        std::env::var("DATA_DIR")
            .unwrap_or_else(|_| "data/daily_distribution_data".to_string()),
    );
    info!("Loading snapshot sources from {}", data_dir.display());

    // The table is built once, before the listener starts; a malformed
    // source aborts startup.
    let sources = default_sources(&data_dir);
    let table =
        DistributionTable::load(&sources).context("failed to build distribution table")?;
    info!(
        "Serving {} rows across {} categories",
        table.len(),
        table.categories().len()
    );

    let state = AppState {
        service: Arc::new(DistributionService::new(Arc::new(table))),
    };

    // Configure CORS for the dashboard frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // Build router
    let app = Router::new()
        .nest("/api", routes::api_routes())
        .layer(cors)
        .with_state(state);

    // Start server
    let port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
