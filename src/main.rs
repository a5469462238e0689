use artweb_core::config::{content_data_dir_from_env_value, initialise_storage};
use artweb_core::CoreConfig;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the ArtWeb content service
///
/// Prepares the content data directory (one directory per table) and serves the REST API.
///
/// # Environment Variables
/// - `ARTWEB_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CONTENT_DATA_DIR`: Directory for content storage (default: "content_data")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If storage preparation, server startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("artweb=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("artweb_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("ARTWEB_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let cfg = Arc::new(CoreConfig::new(content_data_dir_from_env_value(
        std::env::var("CONTENT_DATA_DIR").ok(),
    ))?);
    initialise_storage(&cfg)?;

    tracing::info!("++ Starting ArtWeb REST on {}", rest_addr);

    let app = api_rest::router(api_rest::AppState::new(cfg));
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
