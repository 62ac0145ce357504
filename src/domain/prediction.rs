// Prediction domain models
use crate::domain::format::{format_confidence, format_hour, format_occupancy};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_COLOR: &str = "#666666";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AvailabilityLevel {
    High,
    Medium,
    Low,
    Unknown,
}

impl From<String> for AvailabilityLevel {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "High" => AvailabilityLevel::High,
            "Medium" => AvailabilityLevel::Medium,
            "Low" => AvailabilityLevel::Low,
            _ => AvailabilityLevel::Unknown,
        }
    }
}

impl From<AvailabilityLevel> for String {
    fn from(level: AvailabilityLevel) -> Self {
        level.as_str().to_string()
    }
}

impl AvailabilityLevel {
    /// Map marker / badge color for this level
    pub fn color(self) -> &'static str {
        match self {
            AvailabilityLevel::High => "#10b981",
            AvailabilityLevel::Medium => "#f59e0b",
            AvailabilityLevel::Low => "#ef4444",
            AvailabilityLevel::Unknown => UNKNOWN_COLOR,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AvailabilityLevel::High => "High Availability",
            AvailabilityLevel::Medium => "Medium Availability",
            AvailabilityLevel::Low => "Low Availability",
            AvailabilityLevel::Unknown => "Unknown Availability",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AvailabilityLevel::High => "High",
            AvailabilityLevel::Medium => "Medium",
            AvailabilityLevel::Low => "Low",
            AvailabilityLevel::Unknown => "Unknown",
        }
    }

    /// Whether the user should be offered nearby alternatives
    pub fn wants_alternatives(self) -> bool {
        matches!(self, AvailabilityLevel::Medium | AvailabilityLevel::Low)
    }
}

/// Body of `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub zone_id: i64,
    pub date: NaiveDate,
    pub hour: u8,
    pub day_of_week: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub zone_id: Option<i64>,
    #[serde(default)]
    pub zone_name: String,
    pub availability_level: AvailabilityLevel,
    pub predicted_occupancy: f64,
    pub confidence_score: f64,
    #[serde(default)]
    pub available_spaces: Option<i64>,
    #[serde(default)]
    pub total_spaces: Option<i64>,
    #[serde(default)]
    pub factors: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Ready-to-render strings for a prediction card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionDisplay {
    pub level_label: &'static str,
    pub color: &'static str,
    pub confidence: String,
    pub occupancy: String,
}

impl Prediction {
    pub fn display(&self) -> PredictionDisplay {
        PredictionDisplay {
            level_label: self.availability_level.label(),
            color: self.availability_level.color(),
            confidence: format_confidence(self.confidence_score),
            occupancy: format_occupancy(self.predicted_occupancy),
        }
    }
}

/// One card of the multi-hour forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyForecast {
    pub hour: u8,
    pub hour_label: String,
    pub availability: f64,
    pub confidence_percent: f64,
    pub predicted_occupancy: f64,
    pub available_spaces: Option<i64>,
    pub total_spaces: Option<i64>,
    pub availability_level: AvailabilityLevel,
}

impl HourlyForecast {
    pub fn from_prediction(hour: u8, prediction: &Prediction) -> Self {
        Self {
            hour,
            hour_label: format_hour(hour),
            availability: 100.0 - prediction.predicted_occupancy,
            confidence_percent: prediction.confidence_score * 100.0,
            predicted_occupancy: prediction.predicted_occupancy,
            available_spaces: prediction.available_spaces,
            total_spaces: prediction.total_spaces,
            availability_level: prediction.availability_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prediction_parses_backend_payload() {
        let payload = json!({
            "zone_id": 1,
            "zone_name": "Downtown Pike St",
            "availability_level": "Medium",
            "confidence_score": 0.85,
            "predicted_occupancy": 65.5,
            "timestamp": "2026-02-07T14:00:00",
            "factors": {"time_of_day": "afternoon", "events_nearby": 0}
        });
        let prediction: Prediction = serde_json::from_value(payload).unwrap();
        assert_eq!(prediction.availability_level, AvailabilityLevel::Medium);
        assert_eq!(prediction.available_spaces, None);
        assert_eq!(prediction.factors.len(), 2);
    }

    #[test]
    fn test_unknown_level_falls_back_to_gray() {
        let level: AvailabilityLevel = serde_json::from_value(json!("Extreme")).unwrap();
        assert_eq!(level, AvailabilityLevel::Unknown);
        assert_eq!(level.color(), UNKNOWN_COLOR);
    }

    #[test]
    fn test_alternatives_only_below_high() {
        assert!(!AvailabilityLevel::High.wants_alternatives());
        assert!(AvailabilityLevel::Medium.wants_alternatives());
        assert!(AvailabilityLevel::Low.wants_alternatives());
    }

    #[test]
    fn test_hourly_forecast_inverts_occupancy() {
        let prediction = Prediction {
            zone_id: Some(2),
            zone_name: "Downtown 1st Ave".to_string(),
            availability_level: AvailabilityLevel::Low,
            predicted_occupancy: 88.0,
            confidence_score: 0.9,
            available_spaces: Some(12),
            total_spaces: Some(100),
            factors: Default::default(),
            timestamp: None,
        };
        let card = HourlyForecast::from_prediction(17, &prediction);
        assert_eq!(card.availability, 12.0);
        assert!((card.confidence_percent - 90.0).abs() < 1e-9);
        assert_eq!(card.available_spaces, Some(12));
        assert_eq!(card.hour_label, "5:00 PM");

        let display = prediction.display();
        assert_eq!(display.level_label, "Low Availability");
        assert_eq!(display.confidence, "90%");
        assert_eq!(display.occupancy, "88.0%");
    }
}
