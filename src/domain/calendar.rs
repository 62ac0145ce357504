// Calendar domain model - Selection and derived day-of-week
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use thiserror::Error;

pub const DAYS_OF_WEEK: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Day-of-week index in the backend's convention (Monday=0 .. Sunday=6)
pub fn day_of_week(date: NaiveDate) -> u8 {
    let native = date.weekday().num_days_from_sunday() as u8;
    (native + 6) % 7
}

pub fn day_name(index: u8) -> &'static str {
    DAYS_OF_WEEK[(index % 7) as usize]
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("hour must be between 0 and 23, got {0}")]
pub struct InvalidHour(pub u8);

/// The user's current zone/date/hour choice. The day of week is never stored;
/// it is always derived from `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub zone_id: Option<i64>,
    pub date: NaiveDate,
    hour: u8,
}

impl Selection {
    pub fn new(zone_id: Option<i64>, date: NaiveDate, hour: u8) -> Result<Self, InvalidHour> {
        if hour > 23 {
            return Err(InvalidHour(hour));
        }
        Ok(Self { zone_id, date, hour })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn day_of_week(&self) -> u8 {
        day_of_week(self.date)
    }

    /// Hour `offset` steps after the selected one, wrapping past midnight
    pub fn hour_after(&self, offset: u8) -> u8 {
        ((self.hour as u16 + offset as u16) % 24) as u8
    }
}
