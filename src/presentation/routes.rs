// Router construction
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    current_user, day_events, get_selection, health_check, list_remote_zones, list_zones, login,
    logout, put_selection, register, zone_colors, zone_insight,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/zones", get(list_zones))
        .route("/zones/remote", get(list_remote_zones))
        .route("/zones/colors", get(zone_colors))
        .route("/zones/:id/insight", get(zone_insight))
        .route("/selection", get(get_selection).put(put_selection))
        .route("/events/date/:date", get(day_events))
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(current_user))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
