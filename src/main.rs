//! FinanceBot - keyword-driven financial Q&A assistant
//!
//! Serves chat sessions over HTTP. Each session runs a small state machine
//! that accepts one question at a time and answers from a fixed knowledge
//! base after a simulated delay.

mod api;
mod config;
mod knowledge;
mod message;
mod runtime;
mod state_machine;
mod transcript;

use api::{create_router, AppState};
use config::AppConfig;
use runtime::SimulatedBackend;
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "financebot=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        port = config.port,
        min_delay_ms = u64::try_from(config.min_delay.as_millis()).unwrap_or(u64::MAX),
        max_delay_ms = u64::try_from(config.max_delay.as_millis()).unwrap_or(u64::MAX),
        sweep_secs = config.sweep_interval.as_secs(),
        "Configuration loaded"
    );

    let state = AppState::new(SimulatedBackend::new(config.min_delay, config.max_delay));
    let _sweeper = state.registry.spawn_sweeper(config.sweep_interval);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("FinanceBot server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
