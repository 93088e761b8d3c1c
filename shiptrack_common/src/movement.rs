use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

const DATE_FORMATS: [&str; 4] = ["%d.%m.%Y", "%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%d.%m.%Y %H:%M:%S"];

/// A single carrier-reported event in a shipment's history.
///
/// The carrier reports dates and times as free text, so they are kept verbatim. [`Movement::timestamp`] makes a best
/// effort at interpreting them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
}

impl Movement {
    pub fn new<S: Into<String>>(date: S, time: S, location: S, description: S) -> Self {
        Self { date: date.into(), time: time.into(), location: location.into(), description: description.into() }
    }

    /// True if the carrier supplied none of the four fields.
    pub fn is_empty(&self) -> bool {
        self.date.is_empty() && self.time.is_empty() && self.location.is_empty() && self.description.is_empty()
    }

    /// The carrier's local event time. A missing time of day is read as midnight. `None` if the date cannot be read.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let date = self.date.trim();
        if let Some(dt) = DATETIME_FORMATS.iter().find_map(|f| NaiveDateTime::parse_from_str(date, f).ok()) {
            return Some(dt);
        }
        let day = DATE_FORMATS.iter().find_map(|f| NaiveDate::parse_from_str(date, f).ok())?;
        let time = self.time.trim();
        if time.is_empty() {
            return day.and_hms_opt(0, 0, 0);
        }
        let time = TIME_FORMATS.iter().find_map(|f| NaiveTime::parse_from_str(time, f).ok())?;
        Some(day.and_time(time))
    }
}
