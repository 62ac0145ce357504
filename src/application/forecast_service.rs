// Zone insight service - Event alert, multi-hour forecast and alternatives
use crate::application::event_service::EventService;
use crate::application::parking_api::{ApiError, ParkingApi};
use crate::domain::calendar::Selection;
use crate::domain::event::{Event, EventAlert};
use crate::domain::prediction::{HourlyForecast, PredictionRequest};
use crate::domain::recommendation::{AlternativeZone, MAX_RECOMMENDATIONS, RecommendationQuery};
use crate::domain::zone::{Zone, find_reference_zone};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Selected hour plus the three that follow
pub const FORECAST_HOURS: u8 = 4;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("no zone selected")]
    NoZoneSelected,

    #[error("zone {0} does not exist")]
    UnknownZone(i64),

    #[error("Error loading predictions. Please try again.")]
    Batch(#[source] ApiError),

    #[error("zone selection changed while loading")]
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeCard {
    #[serde(flatten)]
    pub zone: AlternativeZone,
    pub color: &'static str,
}

impl From<AlternativeZone> for AlternativeCard {
    fn from(zone: AlternativeZone) -> Self {
        let color = zone.color();
        Self { zone, color }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneInsight {
    pub zone: Zone,
    pub selection: Selection,
    pub day_of_week: u8,
    pub alert: Option<EventAlert>,
    pub events: Vec<Event>,
    pub forecasts: Vec<HourlyForecast>,
    pub alternatives: Vec<AlternativeCard>,
}

#[derive(Clone)]
pub struct ZoneInsightService {
    api: Arc<dyn ParkingApi>,
    events: EventService,
    latest: Arc<AtomicU64>,
}

impl ZoneInsightService {
    pub fn new(api: Arc<dyn ParkingApi>, events: EventService) -> Self {
        Self {
            api,
            events,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Build the full insight for one zone. Only the most recently started
    /// call may complete; older ones resolve to `ForecastError::Superseded`.
    pub async fn zone_insight(&self, selection: Selection) -> Result<ZoneInsight, ForecastError> {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let zone_id = selection.zone_id.ok_or(ForecastError::NoZoneSelected)?;
        let zone = self.resolve_zone(zone_id).await?;
        let day_of_week = selection.day_of_week();

        let events = self.events.zone_events(zone_id, selection.date).await;
        let alert = EventAlert::for_hour(&events, selection.hour());

        let forecasts = self.hourly_forecasts(zone_id, selection).await?;

        let current_level = forecasts[0].availability_level;
        tracing::debug!(
            "Zone {} has {} availability at {}h",
            zone_id,
            current_level.as_str(),
            selection.hour()
        );
        let alternatives = if current_level.wants_alternatives() {
            let query = RecommendationQuery::nearby(
                zone_id,
                selection.date,
                selection.hour(),
                day_of_week,
                current_level,
            );
            match self.api.recommendations(&query).await {
                Ok(zones) => zones
                    .into_iter()
                    .take(MAX_RECOMMENDATIONS as usize)
                    .map(AlternativeCard::from)
                    .collect(),
                Err(e) => {
                    tracing::warn!("Error fetching alternative zones for {}: {}", zone_id, e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        if self.latest.load(Ordering::SeqCst) != generation {
            tracing::debug!("Discarding superseded insight for zone {}", zone_id);
            return Err(ForecastError::Superseded);
        }

        Ok(ZoneInsight {
            zone,
            selection,
            day_of_week,
            alert,
            events,
            forecasts,
            alternatives,
        })
    }

    async fn resolve_zone(&self, zone_id: i64) -> Result<Zone, ForecastError> {
        if let Some(zone) = find_reference_zone(zone_id) {
            return Ok(zone);
        }
        self.api.get_zone(zone_id).await.map_err(|e| {
            tracing::debug!("Zone lookup for {} failed: {}", zone_id, e);
            ForecastError::UnknownZone(zone_id)
        })
    }

    /// Sequential; the first failure aborts the whole batch
    async fn hourly_forecasts(
        &self,
        zone_id: i64,
        selection: Selection,
    ) -> Result<Vec<HourlyForecast>, ForecastError> {
        let mut forecasts = Vec::with_capacity(FORECAST_HOURS as usize);
        for offset in 0..FORECAST_HOURS {
            let hour = selection.hour_after(offset);
            let request = PredictionRequest {
                zone_id,
                date: selection.date,
                hour,
                day_of_week: selection.day_of_week(),
            };
            let prediction = self.api.predict(&request).await.map_err(|e| {
                tracing::error!(
                    "Error fetching predictions for zone {} at {}h: {}",
                    zone_id,
                    hour,
                    e
                );
                ForecastError::Batch(e)
            })?;
            forecasts.push(HourlyForecast::from_prediction(hour, &prediction));
        }
        Ok(forecasts)
    }
}
