// HTTP client for the parking prediction backend
use crate::application::parking_api::{ApiError, ApiResult, ParkingApi};
use crate::application::session_store::SessionStore;
use crate::domain::event::{DayEvents, Event};
use crate::domain::prediction::{Prediction, PredictionRequest};
use crate::domain::recommendation::{AlternativeZone, RecommendationQuery};
use crate::domain::session::{Credentials, Registration, TokenResponse};
use crate::domain::zone::Zone;
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Pull a human-readable message out of an error payload.
///
/// `detail` may be a plain string or a list of `{msg}` validation entries;
/// some endpoints use `message` instead.
pub fn extract_error_message(payload: &Value) -> Option<String> {
    match payload.get("detail") {
        Some(Value::String(detail)) => return Some(detail.clone()),
        Some(Value::Array(entries)) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|e| e.get("msg").and_then(Value::as_str))
                .collect();
            if !messages.is_empty() {
                return Some(messages.join(", "));
            }
        }
        _ => {}
    }

    payload
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn error_message_from_body(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(payload) => extract_error_message(&payload),
        Err(_) => {
            let text = body.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
    }
}

#[derive(Clone)]
pub struct HttpParkingApi {
    base_url: String,
    client: reqwest::Client,
    session: Arc<dyn SessionStore>,
}

impl HttpParkingApi {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        session: Arc<dyn SessionStore>,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let request = self.client.get(self.url(path));
        self.send(path, request).await
    }

    async fn get_with<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.client.get(self.url(path)).query(query);
        self.send(path, request).await
    }

    async fn post<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.client.post(self.url(path)).json(body);
        self.send(path, request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> ApiResult<T> {
        let request = match self.session.load().await {
            Ok(Some(session)) => request.bearer_auth(session.token),
            Ok(None) => request,
            Err(e) => {
                tracing::warn!("Could not read session for {}: {}", path, e);
                request
            }
        };

        tracing::debug!("Calling backend {}", path);
        let response = request
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                message: error_message_from_body(&body),
            });
        }

        response.json::<T>().await.map_err(|e| ApiError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl ParkingApi for HttpParkingApi {
    async fn list_zones(&self) -> ApiResult<Vec<Zone>> {
        self.get("/zones").await
    }

    async fn get_zone(&self, zone_id: i64) -> ApiResult<Zone> {
        self.get(&format!("/zones/{}", zone_id)).await
    }

    async fn events_for_zone(
        &self,
        zone_id: Option<i64>,
        date: Option<NaiveDate>,
    ) -> ApiResult<Vec<Event>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(zone_id) = zone_id {
            params.push(("zone_id", zone_id.to_string()));
        }
        if let Some(date) = date {
            params.push(("date", date.to_string()));
        }
        self.get_with("/events", &params).await
    }

    async fn events_on_date(&self, date: NaiveDate) -> ApiResult<DayEvents> {
        let path = format!("/events/date/{}", urlencoding::encode(&date.to_string()));
        self.get(&path).await
    }

    async fn predict(&self, request: &PredictionRequest) -> ApiResult<Prediction> {
        self.post("/predict", request).await
    }

    async fn recommendations(
        &self,
        query: &RecommendationQuery,
    ) -> ApiResult<Vec<AlternativeZone>> {
        self.get_with("/recommendations", query).await
    }

    async fn login(&self, credentials: &Credentials) -> ApiResult<TokenResponse> {
        self.post("/auth/login", credentials).await
    }

    async fn register(&self, registration: &Registration) -> ApiResult<TokenResponse> {
        self.post("/auth/register", registration).await
    }
}
