use serde::{Deserialize, Serialize};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d@%H:%M";
pub const DATE_DISPLAY_FORMAT: &str = "%d %b %Y";
pub const DATETIME_DISPLAY_FORMAT: &str = "%d %b %Y at %H:%M";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SetGroup {
    pub id: Uuid,
    pub name: String,
}

impl SetGroup {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}

/// A set of repetitions done at a specified date/time.
///
/// Sets are never edited once recorded; the timestamp is local wall-clock time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SetRecord {
    pub id: Uuid,
    pub group_id: Uuid,
    pub quantity: u32,
    pub date_time: NaiveDateTime,
}

impl SetRecord {
    pub fn new(group_id: Uuid, quantity: u32, date_time: Option<NaiveDateTime>) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            quantity,
            date_time: date_time.unwrap_or_else(|| Local::now().naive_local()),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date_time.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.date_time.time()
    }

    pub fn date_string(&self) -> String {
        self.date_time.format(DATE_FORMAT).to_string()
    }

    pub fn time_string(&self) -> String {
        self.date_time.format(TIME_FORMAT).to_string()
    }

    pub fn date_time_string(&self) -> String {
        self.date_time.format(DATETIME_FORMAT).to_string()
    }

    pub fn date_display_string(&self) -> String {
        self.date_time.format(DATE_DISPLAY_FORMAT).to_string()
    }

    pub fn date_time_display_string(&self) -> String {
        self.date_time.format(DATETIME_DISPLAY_FORMAT).to_string()
    }
}
