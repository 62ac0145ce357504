// Mapping of application errors onto HTTP responses
use crate::application::auth_service::AuthError;
use crate::application::forecast_service::ForecastError;
use crate::application::parking_api::ApiError;
use crate::application::prediction_service::failure_message;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Please sign in to continue")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Upstream(#[from] ApiError),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = match &self {
            HttpError::Unauthorized => StatusCode::UNAUTHORIZED,
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Forecast(ForecastError::NoZoneSelected) => StatusCode::BAD_REQUEST,
            HttpError::Forecast(ForecastError::UnknownZone(_)) => StatusCode::NOT_FOUND,
            HttpError::Forecast(ForecastError::Batch(_)) => StatusCode::BAD_GATEWAY,
            HttpError::Forecast(ForecastError::Superseded) => StatusCode::CONFLICT,
            HttpError::Auth(AuthError::Validation(_)) => StatusCode::BAD_REQUEST,
            HttpError::Auth(AuthError::Rejected(_)) => StatusCode::UNAUTHORIZED,
            HttpError::Auth(AuthError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::Upstream(e) if e.status() == Some(404) => StatusCode::NOT_FOUND,
            HttpError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };

        let message = match &self {
            HttpError::Upstream(e) => failure_message(e),
            other => other.to_string(),
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", message);
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
