use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::model::set::SetRecord;

/// Progress of a single calendar day against the daily target.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DayInfo {
    pub date: NaiveDate,
    pub date_string: String,
    pub sets: Vec<SetRecord>,
    pub num_sets: usize,
    pub num_reps: u64,
    pub target: u32,
    pub to_go: u64,
    pub extra: u64,
    // Unmet target carried over from earlier days, reduced by surplus days.
    pub behind: u64,
}

/// The days of a report window, after idle leading days were dropped.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DayWindow {
    pub requested_days: usize,
    pub skipped: usize,
    pub days: Vec<DayInfo>,
}

impl DayWindow {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn total_sets(&self) -> usize {
        self.days.iter().map(|d| d.num_sets).sum()
    }

    pub fn total_reps(&self) -> u64 {
        self.days.iter().map(|d| d.num_reps).sum()
    }
}
