// Port for the external prediction/recommendation/event backend
use crate::domain::event::{DayEvents, Event};
use crate::domain::prediction::{Prediction, PredictionRequest};
use crate::domain::recommendation::{AlternativeZone, RecommendationQuery};
use crate::domain::session::{Credentials, Registration, TokenResponse};
use crate::domain::zone::Zone;
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {path} failed: {reason}")]
    Transport { path: String, reason: String },

    #[error("{path} returned HTTP {status}")]
    Status {
        path: String,
        status: u16,
        message: Option<String>,
    },

    #[error("could not decode response from {path}: {reason}")]
    Decode { path: String, reason: String },
}

impl ApiError {
    /// Human-readable message supplied by the server, if any
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[async_trait]
pub trait ParkingApi: Send + Sync {
    async fn list_zones(&self) -> ApiResult<Vec<Zone>>;

    async fn get_zone(&self, zone_id: i64) -> ApiResult<Zone>;

    /// Events filtered by zone and/or date; `None` filters are omitted
    async fn events_for_zone(
        &self,
        zone_id: Option<i64>,
        date: Option<NaiveDate>,
    ) -> ApiResult<Vec<Event>>;

    async fn events_on_date(&self, date: NaiveDate) -> ApiResult<DayEvents>;

    async fn predict(&self, request: &PredictionRequest) -> ApiResult<Prediction>;

    async fn recommendations(&self, query: &RecommendationQuery) -> ApiResult<Vec<AlternativeZone>>;

    async fn login(&self, credentials: &Credentials) -> ApiResult<TokenResponse>;

    async fn register(&self, registration: &Registration) -> ApiResult<TokenResponse>;
}
