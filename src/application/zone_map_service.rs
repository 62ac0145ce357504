// Zone map service - Availability colors for the map overlay
use crate::application::parking_api::ParkingApi;
use crate::domain::calendar::day_of_week;
use crate::domain::prediction::{AvailabilityLevel, PredictionRequest, UNKNOWN_COLOR};
use crate::domain::zone::{Zone, reference_zones};
use chrono::NaiveDate;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneMarker {
    pub zone_id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub color: &'static str,
    pub availability_level: Option<AvailabilityLevel>,
}

impl ZoneMarker {
    fn new(zone: Zone, level: Option<AvailabilityLevel>) -> Self {
        Self {
            zone_id: zone.id,
            color: level.map(AvailabilityLevel::color).unwrap_or(UNKNOWN_COLOR),
            name: zone.name,
            lat: zone.lat,
            lng: zone.lng,
            availability_level: level,
        }
    }
}

#[derive(Clone)]
pub struct ZoneMapService {
    api: Arc<dyn ParkingApi>,
}

impl ZoneMapService {
    pub fn new(api: Arc<dyn ParkingApi>) -> Self {
        Self { api }
    }

    /// One independent prediction per reference zone. A failing zone falls
    /// back to the gray marker without affecting the others.
    pub async fn zone_markers(&self, date: NaiveDate, hour: u8) -> Vec<ZoneMarker> {
        let day = day_of_week(date);
        let lookups = reference_zones().into_iter().map(|zone| {
            let api = self.api.clone();
            async move {
                let request = PredictionRequest {
                    zone_id: zone.id,
                    date,
                    hour,
                    day_of_week: day,
                };
                match api.predict(&request).await {
                    Ok(prediction) => ZoneMarker::new(zone, Some(prediction.availability_level)),
                    Err(e) => {
                        tracing::warn!("Error fetching color for zone {}: {}", zone.id, e);
                        ZoneMarker::new(zone, None)
                    }
                }
            }
        });

        join_all(lookups).await
    }
}
