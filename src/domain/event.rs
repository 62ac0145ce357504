// Event domain models - Scheduled events, impact levels and derived alerts
use crate::domain::format::format_thousands;
use crate::domain::zone::zone_label;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Number(i64),
    Text(String),
}

/// Expected attendance as reported by the backend: either a JSON number
/// (integer or float) or a free-form string such as `"12,000"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Attendance {
    Count(serde_json::Number),
    Text(String),
}

impl Attendance {
    /// Head count; fractions are truncated and negatives count as zero.
    pub fn count(&self) -> u64 {
        match self {
            Attendance::Count(n) => n
                .as_u64()
                .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
                .unwrap_or(0),
            Attendance::Text(s) => {
                let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
                digits.parse().unwrap_or(0)
            }
        }
    }

    pub fn display(&self) -> String {
        match self {
            Attendance::Count(_) => format_thousands(self.count()),
            Attendance::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventImpact {
    Low,
    Medium,
    High,
    VeryHigh,
    Other(String),
}

impl From<String> for EventImpact {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().replace('_', " ").as_str() {
            "low" => EventImpact::Low,
            "medium" => EventImpact::Medium,
            "high" => EventImpact::High,
            "very high" => EventImpact::VeryHigh,
            _ => EventImpact::Other(raw),
        }
    }
}

impl From<EventImpact> for String {
    fn from(impact: EventImpact) -> Self {
        match impact {
            EventImpact::Low => "low".to_string(),
            EventImpact::Medium => "medium".to_string(),
            EventImpact::High => "high".to_string(),
            EventImpact::VeryHigh => "very high".to_string(),
            EventImpact::Other(raw) => raw,
        }
    }
}

impl EventImpact {
    /// Severity rank; unrecognized values rank below `Low`
    pub fn rank(&self) -> u8 {
        match self {
            EventImpact::Other(_) => 0,
            EventImpact::Low => 1,
            EventImpact::Medium => 2,
            EventImpact::High => 3,
            EventImpact::VeryHigh => 4,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            EventImpact::VeryHigh => "Very High Impact",
            EventImpact::High => "High Impact",
            EventImpact::Medium => "Medium Impact",
            EventImpact::Low | EventImpact::Other(_) => "Low Impact",
        }
    }

    pub fn parking_outlook(&self) -> &'static str {
        match self {
            EventImpact::VeryHigh => "Parking will be extremely limited due to major event",
            EventImpact::High => "Parking will be very limited due to event",
            EventImpact::Medium => "Parking may be challenging due to event",
            EventImpact::Low | EventImpact::Other(_) => "Slight parking reduction due to event",
        }
    }

    pub fn arrival_advice(&self) -> &'static str {
        match self {
            EventImpact::VeryHigh => "Arrive 2+ hours early",
            EventImpact::High => "Arrive 1+ hour early",
            EventImpact::Medium => "Arrive 30-45 min early",
            EventImpact::Low | EventImpact::Other(_) => "Normal arrival time OK",
        }
    }

    pub fn occupancy_band(&self) -> &'static str {
        match self {
            EventImpact::VeryHigh => "90-100%",
            EventImpact::High => "75-90%",
            EventImpact::Medium => "60-75%",
            EventImpact::Low | EventImpact::Other(_) => "50-60%",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    #[serde(default)]
    pub zone_id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub event_type: String,
    pub start_time: String,
    pub end_time: String,
    pub expected_impact: EventImpact,
    #[serde(default)]
    pub expected_attendance: Option<Attendance>,
}

fn clock_hour(time: &str) -> Option<u8> {
    time.split(':').next()?.trim().parse().ok()
}

impl Event {
    pub fn start_hour(&self) -> Option<u8> {
        clock_hour(&self.start_time)
    }

    pub fn end_hour(&self) -> Option<u8> {
        clock_hour(&self.end_time)
    }

    /// Inclusive on both ends; events with unparseable times never match
    pub fn covers_hour(&self, hour: u8) -> bool {
        match (self.start_hour(), self.end_hour()) {
            (Some(start), Some(end)) => start <= hour && hour <= end,
            _ => false,
        }
    }

    pub fn attendance_count(&self) -> u64 {
        self.expected_attendance.as_ref().map(Attendance::count).unwrap_or(0)
    }

    pub fn attendance_display(&self) -> String {
        self.expected_attendance
            .as_ref()
            .map(Attendance::display)
            .unwrap_or_else(|| "0".to_string())
    }
}

pub fn total_attendance<'a>(events: impl IntoIterator<Item = &'a Event>) -> u64 {
    events.into_iter().map(Event::attendance_count).sum()
}

/// Highest impact among `events`; the first one wins on ties
pub fn highest_impact<'a>(events: impl IntoIterator<Item = &'a Event>) -> Option<EventImpact> {
    let mut best: Option<&EventImpact> = None;
    for event in events {
        if best.is_none_or(|b| event.expected_impact.rank() > b.rank()) {
            best = Some(&event.expected_impact);
        }
    }
    best.cloned()
}

fn unique_in_order<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Alert for events overlapping the selected hour in one zone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventAlert {
    pub event_names: Vec<String>,
    pub impact: EventImpact,
    pub headline: String,
    pub outlook: String,
    pub reasoning: String,
}

impl EventAlert {
    pub fn for_hour(events: &[Event], hour: u8) -> Option<Self> {
        let happening: Vec<&Event> = events.iter().filter(|e| e.covers_hour(hour)).collect();
        let impact = highest_impact(happening.iter().copied())?;

        let reasoning = match happening.as_slice() {
            [event] => format!(
                "{} at {} is expected to draw {}+ attendees, significantly increasing parking demand in this zone.",
                event.name,
                event.venue,
                event.attendance_display()
            ),
            many => {
                let venues = unique_in_order(many.iter().map(|e| e.venue.as_str()));
                format!(
                    "{} events happening simultaneously at {}, with combined attendance of {}+ people, creating high parking demand.",
                    many.len(),
                    venues.join(" and "),
                    format_thousands(total_attendance(many.iter().copied()))
                )
            }
        };

        Some(Self {
            event_names: happening.iter().map(|e| e.name.clone()).collect(),
            headline: impact.headline().to_string(),
            outlook: impact.parking_outlook().to_string(),
            impact,
            reasoning,
        })
    }
}

/// Payload of `GET /events/date/{date}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DayEvents {
    #[serde(default)]
    pub total_events: usize,
    #[serde(default)]
    pub zones_affected: Vec<i64>,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueDigest {
    pub venue: String,
    pub highest_impact: EventImpact,
    pub zone_ids: Vec<i64>,
    pub zone_label: String,
    pub events: Vec<Event>,
    pub reasoning: String,
    pub arrival_advice: String,
    pub occupancy_forecast: String,
}

impl VenueDigest {
    fn build(venue: String, events: Vec<&Event>) -> Self {
        let highest_impact = highest_impact(events.iter().copied())
            .filter(|impact| impact.rank() > EventImpact::Low.rank())
            .unwrap_or(EventImpact::Low);

        let mut zone_ids: Vec<i64> = events.iter().filter_map(|e| e.zone_id).collect();
        zone_ids.sort_unstable();
        zone_ids.dedup();

        let zone_label = match zone_ids.as_slice() {
            [only] => zone_label(*only),
            ids => format!("{} zones affected", ids.len()),
        };

        // The backend repeats an event once per affected zone
        let mut seen = HashSet::new();
        let unique: Vec<Event> = events
            .into_iter()
            .filter(|e| seen.insert(e.name.as_str()))
            .cloned()
            .collect();

        let reasoning = match unique.as_slice() {
            [event] => format!(
                "{} is expected to draw {}+ attendees, significantly increasing parking demand in nearby zones.",
                event.name,
                event.attendance_display()
            ),
            many => format!(
                "{} events at this venue with combined attendance of {}+ people will create high parking demand.",
                many.len(),
                format_thousands(total_attendance(many))
            ),
        };

        Self {
            venue,
            arrival_advice: highest_impact.arrival_advice().to_string(),
            occupancy_forecast: highest_impact.occupancy_band().to_string(),
            highest_impact,
            zone_ids,
            zone_label,
            events: unique,
            reasoning,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayDigest {
    pub date: NaiveDate,
    pub total_events: usize,
    pub unique_event_count: usize,
    pub zones_affected: Vec<i64>,
    pub venues: Vec<VenueDigest>,
}

impl DayDigest {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_events: 0,
            unique_event_count: 0,
            zones_affected: Vec::new(),
            venues: Vec::new(),
        }
    }

    pub fn from_day_events(date: NaiveDate, day: &DayEvents) -> Self {
        let unique_event_count = day
            .events
            .iter()
            .map(|e| e.name.as_str())
            .collect::<HashSet<_>>()
            .len();

        let mut grouped: Vec<(String, Vec<&Event>)> = Vec::new();
        for event in &day.events {
            match grouped.iter_mut().find(|(venue, _)| *venue == event.venue) {
                Some((_, events)) => events.push(event),
                None => grouped.push((event.venue.clone(), vec![event])),
            }
        }

        Self {
            date,
            total_events: day.total_events,
            unique_event_count,
            zones_affected: day.zones_affected.clone(),
            venues: grouped
                .into_iter()
                .map(|(venue, events)| VenueDigest::build(venue, events))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(
        name: &str,
        venue: &str,
        start: &str,
        end: &str,
        impact: &str,
        attendance: serde_json::Value,
    ) -> Event {
        serde_json::from_value(json!({
            "id": format!("{}_1", name),
            "name": name,
            "zone_id": 6,
            "venue": venue,
            "event_type": "sports",
            "start_time": start,
            "end_time": end,
            "expected_impact": impact,
            "expected_attendance": attendance,
        }))
        .unwrap()
    }

    #[test]
    fn test_window_is_inclusive() {
        let game = event("Mariners Game", "T-Mobile Park", "18:00", "21:00", "high", json!(45000));
        assert!(!game.covers_hour(17));
        assert!(game.covers_hour(18));
        assert!(game.covers_hour(21));
        assert!(!game.covers_hour(22));
    }

    #[test]
    fn test_unparseable_times_never_match() {
        let odd = event("Odd", "Somewhere", "TBD", "21:00", "low", json!(10));
        assert!(!odd.covers_hour(20));
    }

    #[test]
    fn test_attendance_tolerates_strings() {
        let a = event("A", "V", "18:00", "21:00", "low", json!(500));
        let b = event("B", "V", "18:00", "21:00", "low", json!("12,000"));
        let c = event("C", "V", "18:00", "21:00", "low", json!("about 300 people"));
        assert_eq!(total_attendance([&a, &b, &c]), 12800);
    }

    #[test]
    fn test_attendance_accepts_any_json_number() {
        let events: Vec<Event> = serde_json::from_value(json!([
            {
                "id": 1,
                "name": "Game",
                "venue": "T-Mobile Park",
                "event_type": "sports",
                "start_time": "18:00",
                "end_time": "21:00",
                "expected_impact": "high",
                "expected_attendance": 45000.0
            },
            {
                "id": 2,
                "name": "Fair",
                "venue": "T-Mobile Park",
                "event_type": "festival",
                "start_time": "18:00",
                "end_time": "21:00",
                "expected_impact": "low",
                "expected_attendance": "3,000"
            },
            {
                "id": 3,
                "name": "Glitch",
                "venue": "T-Mobile Park",
                "event_type": "other",
                "start_time": "18:00",
                "end_time": "21:00",
                "expected_impact": "low",
                "expected_attendance": -5
            }
        ]))
        .unwrap();

        assert_eq!(events[0].expected_attendance.as_ref().unwrap().display(), "45,000");
        assert_eq!(events[2].expected_attendance.as_ref().unwrap().count(), 0);
        assert_eq!(total_attendance(&events), 48000);

        let alert = EventAlert::for_hour(&events, 19).unwrap();
        assert_eq!(alert.impact, EventImpact::High);
        assert_eq!(alert.event_names, vec!["Game", "Fair", "Glitch"]);
    }

    #[test]
    fn test_impact_parsing_and_order() {
        assert_eq!(EventImpact::from("Very High".to_string()), EventImpact::VeryHigh);
        assert_eq!(EventImpact::from("very_high".to_string()), EventImpact::VeryHigh);
        assert!(EventImpact::VeryHigh.rank() > EventImpact::High.rank());
        assert!(EventImpact::from("huge".to_string()).rank() < EventImpact::Low.rank());
    }

    #[test]
    fn test_single_event_alert() {
        let events = vec![event(
            "Mariners Game",
            "T-Mobile Park",
            "18:00",
            "21:00",
            "High",
            json!(45000),
        )];
        let alert = EventAlert::for_hour(&events, 19).unwrap();
        assert_eq!(alert.event_names, vec!["Mariners Game"]);
        assert_eq!(alert.impact, EventImpact::High);
        assert_eq!(alert.headline, "High Impact");
        assert_eq!(
            alert.reasoning,
            "Mariners Game at T-Mobile Park is expected to draw 45,000+ attendees, significantly increasing parking demand in this zone."
        );
    }

    #[test]
    fn test_multi_event_alert_takes_highest_impact() {
        let events = vec![
            event("Concert", "Lumen Field", "17:00", "22:00", "medium", json!("12,000")),
            event("Game", "T-Mobile Park", "18:00", "21:00", "very high", json!(45000)),
            event("Later", "Lumen Field", "22:00", "23:00", "low", json!(100)),
        ];
        let alert = EventAlert::for_hour(&events, 20).unwrap();
        assert_eq!(alert.event_names, vec!["Concert", "Game"]);
        assert_eq!(alert.impact, EventImpact::VeryHigh);
        assert_eq!(
            alert.reasoning,
            "2 events happening simultaneously at Lumen Field and T-Mobile Park, with combined attendance of 57,000+ people, creating high parking demand."
        );
    }

    #[test]
    fn test_no_alert_outside_window() {
        let events = vec![event("Game", "T-Mobile Park", "18:00", "21:00", "high", json!(45000))];
        assert!(EventAlert::for_hour(&events, 9).is_none());
        assert!(EventAlert::for_hour(&[], 9).is_none());
    }

    #[test]
    fn test_day_digest_groups_by_venue() {
        let mut game_zone7 = event("Game", "T-Mobile Park", "18:00", "23:00", "High", json!(45000));
        game_zone7.zone_id = Some(7);
        let day = DayEvents {
            total_events: 3,
            zones_affected: vec![6, 7, 10],
            events: vec![
                event("Game", "T-Mobile Park", "18:00", "23:00", "High", json!(45000)),
                game_zone7,
                {
                    let mut fair =
                        event("Street Fair", "Fremont", "10:00", "23:00", "low", json!("3,000"));
                    fair.zone_id = Some(10);
                    fair
                },
            ],
        };
        let date = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        let digest = DayDigest::from_day_events(date, &day);

        assert_eq!(digest.unique_event_count, 2);
        assert_eq!(digest.venues.len(), 2);

        let park = &digest.venues[0];
        assert_eq!(park.venue, "T-Mobile Park");
        assert_eq!(park.zone_ids, vec![6, 7]);
        assert_eq!(park.zone_label, "2 zones affected");
        assert_eq!(park.events.len(), 1);
        assert_eq!(park.arrival_advice, "Arrive 1+ hour early");
        assert_eq!(park.occupancy_forecast, "75-90%");

        let fair = &digest.venues[1];
        assert_eq!(fair.zone_label, "Fremont - Fremont Ave");
        assert_eq!(fair.highest_impact, EventImpact::Low);
        assert_eq!(
            fair.reasoning,
            "Street Fair is expected to draw 3,000+ attendees, significantly increasing parking demand in nearby zones."
        );
    }
}
