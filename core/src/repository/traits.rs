use crate::model::set::{SetGroup, SetRecord};
use anyhow::Result;
use chrono::NaiveDate;
use uuid::Uuid;

pub trait SetRepository {
    fn list_groups(&self) -> Result<Vec<SetGroup>>;
    fn find_group(&self, name: &str) -> Result<Option<SetGroup>>;
    fn create_group(&self, group: SetGroup) -> Result<SetGroup>;
    fn add_set(&self, set: SetRecord) -> Result<SetRecord>;
    /// Sets of a group whose date lies in `start..=end`, ordered by time then insertion.
    fn list_sets(
        &self,
        group_id: &Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SetRecord>>;
}
