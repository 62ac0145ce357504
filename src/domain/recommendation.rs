// Alternative-zone recommendation models
use crate::domain::prediction::AvailabilityLevel;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MAX_RECOMMENDATIONS: u8 = 3;
pub const MAX_DISTANCE_KM: f64 = 3.0;

/// Query string of `GET /recommendations`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationQuery {
    pub zone_id: i64,
    pub date: NaiveDate,
    pub hour: u8,
    pub day_of_week: u8,
    pub availability_level: AvailabilityLevel,
    pub max_recommendations: u8,
    pub max_distance_km: f64,
}

impl RecommendationQuery {
    pub fn nearby(
        zone_id: i64,
        date: NaiveDate,
        hour: u8,
        day_of_week: u8,
        availability_level: AvailabilityLevel,
    ) -> Self {
        Self {
            zone_id,
            date,
            hour,
            day_of_week,
            availability_level,
            max_recommendations: MAX_RECOMMENDATIONS,
            max_distance_km: MAX_DISTANCE_KM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeZone {
    pub zone_id: i64,
    pub zone_name: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub distance_display: String,
    pub availability_level: AvailabilityLevel,
}

impl AlternativeZone {
    pub fn color(&self) -> &'static str {
        self.availability_level.color()
    }
}
