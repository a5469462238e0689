//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! This binary is useful for development and debugging. The workspace's main `artweb-run` binary
//! serves the same router and also prepares the content data directory.

use api_rest::{router, AppState};
use artweb_core::config::content_data_dir_from_env_value;
use artweb_core::CoreConfig;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the ArtWeb REST API server
///
/// # Environment Variables
/// - `ARTWEB_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `CONTENT_DATA_DIR`: Content data directory (default: "content_data")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the content data directory does not exist,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("ARTWEB_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting ArtWeb REST API on {}", addr);

    let content_data_dir = content_data_dir_from_env_value(std::env::var("CONTENT_DATA_DIR").ok());
    if !content_data_dir.exists() {
        anyhow::bail!(
            "Content data directory does not exist: {}",
            content_data_dir.display()
        );
    }

    let cfg = Arc::new(CoreConfig::new(content_data_dir)?);
    let app = router(AppState::new(cfg));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
