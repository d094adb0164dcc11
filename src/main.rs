//! Silver Order Board - HTTP service
//!
//! Serves order submission, cancellation, listing and the live order board
//! summary, alongside the static frontend.

use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use silver_order_board::{api, AppState, Config, InMemoryOrderRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    info!("Starting Silver Order Board");

    let config = Config::load()?;
    let addr = config.listen_addr()?;
    info!(
        addr = %addr,
        static_dir = %config.static_dir,
        cors_allowed_origins = ?config.cors_allowed_origins,
        "Configuration loaded"
    );

    let repository = Arc::new(InMemoryOrderRepository::new());
    let state = Arc::new(AppState::new(config, repository)?);
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Order board listening");
    axum::serve(listener, app).await?;

    Ok(())
}
