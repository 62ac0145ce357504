// In-process fake backend shared by the service tests
use crate::application::parking_api::{ApiError, ApiResult, ParkingApi};
use crate::domain::event::{DayEvents, Event};
use crate::domain::prediction::{AvailabilityLevel, Prediction, PredictionRequest};
use crate::domain::recommendation::{AlternativeZone, RecommendationQuery};
use crate::domain::session::{Credentials, Registration, TokenResponse, UserProfile};
use crate::domain::zone::{Zone, reference_zones};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

type PredictFn = dyn Fn(&PredictionRequest) -> ApiResult<Prediction> + Send + Sync;

pub fn prediction(level: AvailabilityLevel, occupancy: f64) -> Prediction {
    Prediction {
        zone_id: None,
        zone_name: "Test Zone".to_string(),
        availability_level: level,
        predicted_occupancy: occupancy,
        confidence_score: 0.8,
        available_spaces: Some((100.0 - occupancy).round() as i64),
        total_spaces: Some(100),
        factors: Default::default(),
        timestamp: None,
    }
}

pub fn status_error(path: &str, status: u16, message: Option<&str>) -> ApiError {
    ApiError::Status {
        path: path.to_string(),
        status,
        message: message.map(str::to_string),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub struct FakeParkingApi {
    predict_fn: Box<PredictFn>,
    events: Option<Vec<Event>>,
    day_events: Option<DayEvents>,
    alternatives: Option<Vec<AlternativeZone>>,
    auth_rejection: Option<ApiError>,
    gates: HashMap<i64, Arc<Notify>>,
    calls: Mutex<Vec<String>>,
}

impl FakeParkingApi {
    pub fn new() -> Self {
        Self {
            predict_fn: Box::new(|req| {
                let mut p = prediction(AvailabilityLevel::High, 20.0);
                p.zone_id = Some(req.zone_id);
                Ok(p)
            }),
            events: Some(Vec::new()),
            day_events: Some(DayEvents::default()),
            alternatives: Some(Vec::new()),
            auth_rejection: None,
            gates: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_predict<F>(mut self, f: F) -> Self
    where
        F: Fn(&PredictionRequest) -> ApiResult<Prediction> + Send + Sync + 'static,
    {
        self.predict_fn = Box::new(f);
        self
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn failing_events(mut self) -> Self {
        self.events = None;
        self.day_events = None;
        self
    }

    pub fn with_day_events(mut self, day: DayEvents) -> Self {
        self.day_events = Some(day);
        self
    }

    pub fn with_alternatives(mut self, alternatives: Vec<AlternativeZone>) -> Self {
        self.alternatives = Some(alternatives);
        self
    }

    pub fn failing_alternatives(mut self) -> Self {
        self.alternatives = None;
        self
    }

    pub fn rejecting_auth(mut self, error: ApiError) -> Self {
        self.auth_rejection = Some(error);
        self
    }

    /// Hold predictions for `zone_id` until the returned handle is notified
    pub fn with_gate(mut self, zone_id: i64) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gates.insert(zone_id, gate.clone());
        (self, gate)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn token_for(username: &str, email: &str) -> TokenResponse {
        TokenResponse {
            access_token: format!("token-{}", username),
            user: UserProfile {
                id: Some("1".to_string()),
                username: username.to_string(),
                email: email.to_string(),
                full_name: None,
            },
        }
    }

    fn auth_result(&self, username: &str, email: &str) -> ApiResult<TokenResponse> {
        match &self.auth_rejection {
            Some(ApiError::Status { path, status, message }) => Err(ApiError::Status {
                path: path.clone(),
                status: *status,
                message: message.clone(),
            }),
            Some(other) => Err(ApiError::Transport {
                path: "/auth".to_string(),
                reason: other.to_string(),
            }),
            None => Ok(Self::token_for(username, email)),
        }
    }
}

#[async_trait]
impl ParkingApi for FakeParkingApi {
    async fn list_zones(&self) -> ApiResult<Vec<Zone>> {
        self.record("zones".to_string());
        Ok(reference_zones())
    }

    async fn get_zone(&self, zone_id: i64) -> ApiResult<Zone> {
        self.record(format!("zone:{}", zone_id));
        reference_zones()
            .into_iter()
            .find(|z| z.id == zone_id)
            .ok_or_else(|| status_error("/zones", 404, Some("Zone not found")))
    }

    async fn events_for_zone(
        &self,
        zone_id: Option<i64>,
        _date: Option<NaiveDate>,
    ) -> ApiResult<Vec<Event>> {
        self.record(format!("events:{:?}", zone_id));
        self.events
            .clone()
            .ok_or_else(|| status_error("/events", 500, None))
    }

    async fn events_on_date(&self, date: NaiveDate) -> ApiResult<DayEvents> {
        self.record(format!("events_on:{}", date));
        self.day_events
            .clone()
            .ok_or_else(|| status_error("/events/date", 500, None))
    }

    async fn predict(&self, request: &PredictionRequest) -> ApiResult<Prediction> {
        self.record(format!("predict:{}:{}", request.zone_id, request.hour));
        if let Some(gate) = self.gates.get(&request.zone_id) {
            gate.notified().await;
        }
        (self.predict_fn)(request)
    }

    async fn recommendations(
        &self,
        query: &RecommendationQuery,
    ) -> ApiResult<Vec<AlternativeZone>> {
        self.record(format!(
            "recommendations:{}:{}",
            query.zone_id,
            query.availability_level.as_str()
        ));
        self.alternatives
            .clone()
            .ok_or_else(|| status_error("/recommendations", 503, None))
    }

    async fn login(&self, credentials: &Credentials) -> ApiResult<TokenResponse> {
        self.record("login".to_string());
        self.auth_result(&credentials.username, "")
    }

    async fn register(&self, registration: &Registration) -> ApiResult<TokenResponse> {
        self.record("register".to_string());
        self.auth_result(&registration.username, &registration.email)
    }
}
