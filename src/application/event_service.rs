// Event service - Zone events and the per-date venue digest
use crate::application::parking_api::ParkingApi;
use crate::domain::event::{DayDigest, Event};
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Clone)]
pub struct EventService {
    api: Arc<dyn ParkingApi>,
}

impl EventService {
    pub fn new(api: Arc<dyn ParkingApi>) -> Self {
        Self { api }
    }

    /// Events scheduled in `zone_id` on `date`.
    /// A failed lookup is logged and treated as "no events".
    pub async fn zone_events(&self, zone_id: i64, date: NaiveDate) -> Vec<Event> {
        match self.api.events_for_zone(Some(zone_id), Some(date)).await {
            Ok(events) => {
                tracing::debug!("Zone {} has {} events on {}", zone_id, events.len(), date);
                events
            }
            Err(e) => {
                tracing::warn!("Error fetching events for zone {}: {}", zone_id, e);
                Vec::new()
            }
        }
    }

    pub async fn day_digest(&self, date: NaiveDate) -> DayDigest {
        match self.api.events_on_date(date).await {
            Ok(day) => DayDigest::from_day_events(date, &day),
            Err(e) => {
                tracing::warn!("Error fetching day events for {}: {}", date, e);
                DayDigest::empty(date)
            }
        }
    }
}
