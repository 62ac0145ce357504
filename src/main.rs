// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::auth_service::AuthService;
use crate::application::event_service::EventService;
use crate::application::forecast_service::ZoneInsightService;
use crate::application::parking_api::ParkingApi;
use crate::application::prediction_service::PredictionOrchestrator;
use crate::application::session_store::{MemorySessionStore, SessionStore};
use crate::application::zone_map_service::ZoneMapService;
use crate::application::zone_service::ZoneService;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::file_session_store::FileSessionStore;
use crate::infrastructure::http_api::HttpParkingApi;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Session store, read once at startup to gate protected views
    let session_store: Arc<dyn SessionStore> = if config.session.path.is_empty() {
        Arc::new(MemorySessionStore::new())
    } else {
        Arc::new(
            FileSessionStore::open(&config.session.path)
                .await
                .with_context(|| format!("Failed to open session file {}", config.session.path))?,
        )
    };
    match session_store.load().await? {
        Some(session) => tracing::info!("Restored session for {}", session.user.username),
        None => tracing::info!("No saved session; sign in required"),
    }

    // Backend client (infrastructure layer)
    let api: Arc<dyn ParkingApi> = Arc::new(HttpParkingApi::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
        session_store.clone(),
    )?);

    // Services (application layer)
    let event_service = EventService::new(api.clone());
    let state = Arc::new(AppState {
        zone_service: ZoneService::new(api.clone()),
        prediction_service: PredictionOrchestrator::new(api.clone()),
        insight_service: ZoneInsightService::new(api.clone(), event_service.clone()),
        zone_map_service: ZoneMapService::new(api.clone()),
        event_service,
        auth_service: AuthService::new(
            api,
            session_store,
            Duration::from_millis(config.auth.redirect_delay_ms),
        ),
    });

    // Router (presentation layer)
    let router = build_router(state);

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!(
        "Starting parking dashboard on {} (backend {})",
        addr,
        config.api.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
