use crate::model::day_info::DayWindow;
use crate::model::set::{SetGroup, SetRecord};
use crate::repository::SetRepository;
use crate::usecase::day_info::{build_day_window, window_start};
use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

pub struct SetService<R: SetRepository> {
    repo: R,
}

impl<R: SetRepository> SetService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// All groups, sorted by name.
    pub fn groups(&self) -> Result<Vec<SetGroup>> {
        let mut groups = self.repo.list_groups()?;
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups)
    }

    pub fn find_group(&self, name: &str) -> Result<Option<SetGroup>> {
        self.repo.find_group(name)
    }

    pub fn add_group(&self, name: &str) -> Result<SetGroup> {
        let name = name.trim();
        if name.is_empty() {
            return Err(anyhow!("Set group name cannot be empty"));
        }
        self.repo.create_group(SetGroup::new(name.to_string()))
    }

    pub fn add_set(
        &self,
        group: &SetGroup,
        quantity: u32,
        date_time: NaiveDateTime,
    ) -> Result<SetRecord> {
        if quantity == 0 {
            return Err(anyhow!("Expected a positive number of reps"));
        }
        let set = self.repo.add_set(SetRecord::new(group.id, quantity, Some(date_time)))?;
        debug!(group = %group.name, quantity, at = %set.date_time_string(), "added set");
        Ok(set)
    }

    /// Progress for the `days` days ending on `today`, with idle leading days skipped.
    pub fn day_window(
        &self,
        group: &SetGroup,
        days: u32,
        target: u32,
        today: NaiveDate,
    ) -> Result<DayWindow> {
        let start = window_start(today, days);
        let records = self.repo.list_sets(&group.id, start, today)?;
        Ok(build_day_window(&records, today, days, target, true))
    }
}
