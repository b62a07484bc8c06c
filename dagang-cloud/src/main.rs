//! dagang-cloud — BantuDagang platform backend
//!
//! Long-running HTTP service that:
//! - Manages merchant data (stores, products, variants, customers)
//! - Provides JWT-authenticated management API for the merchant console
//! - Fulfills product deliveries from per-config inventory ledgers

mod api;
mod auth;
mod config;
mod db;
mod delivery;
mod state;
mod util;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dagang_cloud=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting dagang-cloud (env: {})", config.environment);

    // Initialize application state
    let state = AppState::new(&config).await?;

    let app = api::create_router(state, &config)?;

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("dagang-cloud HTTP listening on {http_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
