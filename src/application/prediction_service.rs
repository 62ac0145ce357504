// Prediction orchestrator - Single-prediction state machine for the dashboard
use crate::application::parking_api::{ApiError, ParkingApi};
use crate::domain::calendar::{Selection, day_name};
use crate::domain::format::{format_date, format_hour};
use crate::domain::prediction::{Prediction, PredictionDisplay, PredictionRequest};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

const FALLBACK_ERROR: &str = "Failed to make prediction";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PredictionState {
    Idle,
    Loading,
    Success {
        prediction: Prediction,
        display: PredictionDisplay,
    },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionView {
    pub selection: Option<Selection>,
    pub day_of_week: Option<u8>,
    pub day_name: Option<&'static str>,
    pub date_label: Option<String>,
    pub hour_label: Option<String>,
    pub generation: u64,
    #[serde(flatten)]
    pub state: PredictionState,
}

#[derive(Debug)]
struct OrchestratorState {
    generation: u64,
    selection: Option<Selection>,
    state: PredictionState,
}

impl OrchestratorState {
    fn view(&self) -> PredictionView {
        let day = self.selection.map(|s| s.day_of_week());
        PredictionView {
            selection: self.selection,
            day_of_week: day,
            day_name: day.map(day_name),
            date_label: self.selection.map(|s| format_date(s.date)),
            hour_label: self.selection.map(|s| format_hour(s.hour())),
            generation: self.generation,
            state: self.state.clone(),
        }
    }
}

/// Message shown for a failed prediction: server detail first, then the
/// status line for HTTP errors, then a fixed fallback when the backend
/// could not be reached or answered garbage
pub fn failure_message(error: &ApiError) -> String {
    if let Some(detail) = error.server_detail().filter(|d| !d.trim().is_empty()) {
        return detail.to_string();
    }
    match error {
        ApiError::Status { .. } => error.to_string(),
        ApiError::Transport { .. } | ApiError::Decode { .. } => FALLBACK_ERROR.to_string(),
    }
}

#[derive(Clone)]
pub struct PredictionOrchestrator {
    api: Arc<dyn ParkingApi>,
    state: Arc<RwLock<OrchestratorState>>,
}

impl PredictionOrchestrator {
    pub fn new(api: Arc<dyn ParkingApi>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(OrchestratorState {
                generation: 0,
                selection: None,
                state: PredictionState::Idle,
            })),
        }
    }

    pub async fn snapshot(&self) -> PredictionView {
        self.state.read().await.view()
    }

    /// Apply a new selection and resolve its prediction.
    ///
    /// Every call supersedes earlier ones: a response for an older selection
    /// that arrives late is discarded instead of overwriting newer state.
    pub async fn select(&self, selection: Selection) -> PredictionView {
        let Some(zone_id) = selection.zone_id else {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.selection = Some(selection);
            state.state = PredictionState::Idle;
            return state.view();
        };

        let generation = self.begin(selection).await;
        let request = PredictionRequest {
            zone_id,
            date: selection.date,
            hour: selection.hour(),
            day_of_week: selection.day_of_week(),
        };

        tracing::debug!(
            "Requesting prediction #{} for zone {} on {} at {}h",
            generation,
            zone_id,
            request.date,
            request.hour
        );
        let outcome = self.api.predict(&request).await;
        self.apply(generation, outcome).await;

        self.snapshot().await
    }

    async fn begin(&self, selection: Selection) -> u64 {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.selection = Some(selection);
        state.state = PredictionState::Loading;
        state.generation
    }

    async fn apply(&self, generation: u64, outcome: Result<Prediction, ApiError>) {
        let mut state = self.state.write().await;
        if state.generation != generation {
            tracing::debug!(
                "Discarding stale prediction #{} (current is #{})",
                generation,
                state.generation
            );
            return;
        }

        state.state = match outcome {
            Ok(prediction) => PredictionState::Success {
                display: prediction.display(),
                prediction,
            },
            Err(e) => {
                tracing::warn!("Prediction #{} failed: {}", generation, e);
                PredictionState::Failed {
                    error: failure_message(&e),
                }
            }
        };
    }
}
