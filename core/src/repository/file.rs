use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::model::set::{SetGroup, SetRecord};
use crate::repository::traits::SetRepository;

#[derive(Serialize, Deserialize, Debug, Default)]
struct Store {
    groups: Vec<SetGroup>,
    sets: Vec<SetRecord>,
}

/// Keeps every group and set in one JSON document.
#[derive(Clone)]
pub struct FileSetRepository {
    file_path: PathBuf,
}

impl FileSetRepository {
    /// Initializes an empty store at `path`, creating parent directories as needed.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Could not create directory {}", parent.display()))?;
            }
        }
        let repo = FileSetRepository { file_path };
        repo.write_store(&Store::default())?;
        debug!(path = %repo.file_path.display(), "created set store");
        Ok(repo)
    }

    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = path.into();
        if !file_path.is_file() {
            return Err(anyhow!("Set store {} does not exist", file_path.display()));
        }
        Ok(FileSetRepository { file_path })
    }

    fn read_store(&self) -> Result<Store> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("Could not open {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let store: Store = serde_json::from_reader(reader)
            .with_context(|| format!("Could not parse {}", self.file_path.display()))?;
        debug!(groups = store.groups.len(), sets = store.sets.len(), "read set store");
        Ok(store)
    }

    fn write_store(&self, store: &Store) -> Result<()> {
        let file = File::create(&self.file_path)
            .with_context(|| format!("Could not write {}", self.file_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, store)?;
        writer.flush()?;
        Ok(())
    }
}

impl SetRepository for FileSetRepository {
    fn list_groups(&self) -> Result<Vec<SetGroup>> {
        Ok(self.read_store()?.groups)
    }

    fn find_group(&self, name: &str) -> Result<Option<SetGroup>> {
        let store = self.read_store()?;
        Ok(store.groups.into_iter().find(|g| g.name == name))
    }

    fn create_group(&self, group: SetGroup) -> Result<SetGroup> {
        let mut store = self.read_store()?;
        if store.groups.iter().any(|g| g.name == group.name) {
            return Err(anyhow!("Set group \"{}\" already exists", group.name));
        }
        store.groups.push(group.clone());
        self.write_store(&store)?;
        Ok(group)
    }

    fn add_set(&self, set: SetRecord) -> Result<SetRecord> {
        let mut store = self.read_store()?;
        if !store.groups.iter().any(|g| g.id == set.group_id) {
            return Err(anyhow!("Set group with ID {} not found", set.group_id));
        }
        store.sets.push(set.clone());
        self.write_store(&store)?;
        Ok(set)
    }

    fn list_sets(
        &self,
        group_id: &Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SetRecord>> {
        let store = self.read_store()?;
        let mut sets: Vec<SetRecord> = store
            .sets
            .into_iter()
            .filter(|s| s.group_id == *group_id && s.date() >= start && s.date() <= end)
            .collect();
        // Stable, so sets sharing a timestamp keep insertion order.
        sets.sort_by_key(|s| s.date_time);
        Ok(sets)
    }
}
