// HTTP request handlers
use crate::application::auth_service::{AuthForm, AuthOutcome};
use crate::application::forecast_service::ZoneInsight;
use crate::application::prediction_service::PredictionView;
use crate::application::zone_map_service::ZoneMarker;
use crate::domain::calendar::Selection;
use crate::domain::event::DayDigest;
use crate::domain::session::{AuthSession, Credentials, Registration, UserProfile};
use crate::domain::zone::Zone;
use crate::presentation::app_state::AppState;
use crate::presentation::http_error::HttpError;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct TimeQuery {
    pub date: NaiveDate,
    pub hour: u8,
}

#[derive(Deserialize)]
pub struct SelectionBody {
    pub zone_id: Option<i64>,
    pub date: NaiveDate,
    pub hour: u8,
}

fn selection(zone_id: Option<i64>, date: NaiveDate, hour: u8) -> Result<Selection, HttpError> {
    Selection::new(zone_id, date, hour).map_err(|e| HttpError::BadRequest(e.to_string()))
}

async fn require_session(state: &AppState) -> Result<AuthSession, HttpError> {
    state
        .auth_service
        .current_session()
        .await?
        .ok_or(HttpError::Unauthorized)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn list_zones(State(state): State<Arc<AppState>>) -> Json<Vec<Zone>> {
    Json(state.zone_service.reference_zones())
}

pub async fn list_remote_zones(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Zone>>, HttpError> {
    Ok(Json(state.zone_service.remote_zones().await?))
}

/// Map overlay colors for every zone at the given date/hour
pub async fn zone_colors(
    Query(query): Query<TimeQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ZoneMarker>>, HttpError> {
    require_session(&state).await?;
    let time = selection(None, query.date, query.hour)?;
    let markers = state
        .zone_map_service
        .zone_markers(time.date, time.hour())
        .await;
    Ok(Json(markers))
}

pub async fn get_selection(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PredictionView>, HttpError> {
    require_session(&state).await?;
    Ok(Json(state.prediction_service.snapshot().await))
}

/// Replace the current selection and wait for its prediction
pub async fn put_selection(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SelectionBody>,
) -> Result<Json<PredictionView>, HttpError> {
    require_session(&state).await?;
    let selection = selection(body.zone_id, body.date, body.hour)?;
    Ok(Json(state.prediction_service.select(selection).await))
}

pub async fn zone_insight(
    Path(zone_id): Path<i64>,
    Query(query): Query<TimeQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ZoneInsight>, HttpError> {
    require_session(&state).await?;
    let selection = selection(Some(zone_id), query.date, query.hour)?;
    Ok(Json(state.insight_service.zone_insight(selection).await?))
}

pub async fn day_events(
    Path(date): Path<NaiveDate>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DayDigest>, HttpError> {
    require_session(&state).await?;
    Ok(Json(state.event_service.day_digest(date).await))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<AuthOutcome>, HttpError> {
    let outcome = state
        .auth_service
        .submit(&AuthForm::Login(credentials))
        .await?;
    Ok(Json(outcome))
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(registration): Json<Registration>,
) -> Result<Json<AuthOutcome>, HttpError> {
    let outcome = state
        .auth_service
        .submit(&AuthForm::Register(registration))
        .await?;
    Ok(Json(outcome))
}

pub async fn logout(State(state): State<Arc<AppState>>) -> Result<StatusCode, HttpError> {
    state.auth_service.logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn current_user(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UserProfile>, HttpError> {
    let session = require_session(&state).await?;
    Ok(Json(session.user))
}
