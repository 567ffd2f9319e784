use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use super::dataset::Dataset;
use super::demo::demo_dataset;
use super::{AssignmentMutator, TimelineSource};
use crate::error::SourceError;
use crate::model::{AssignmentId, TimelineData, TimelineQuery};
use crate::timeline::AssignmentPatch;

/// Dataset kept in a pretty-printed JSON file. Every accepted patch is written back immediately.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    dataset: Dataset,
}

impl JsonFileStore {
    /// Load `path`, or create it with demo data centred on `today` if it does not exist.
    pub fn open(path: impl Into<PathBuf>, today: NaiveDate) -> Result<Self, SourceError> {
        let path = path.into();
        if path.exists() {
            let dataset = load_dataset(&path)?;
            info!(
                path = %path.display(),
                employees = dataset.employees.len(),
                assignments = dataset.assignments.len(),
                "loaded dataset"
            );
            return Ok(Self { path, dataset });
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| SourceError::io(parent, e))?;
        }
        let store = Self {
            dataset: demo_dataset(today),
            path,
        };
        store.save()?;
        info!(path = %store.path.display(), "created demo dataset");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn save(&self) -> Result<(), SourceError> {
        save_dataset(&self.dataset, &self.path)
    }
}

impl TimelineSource for JsonFileStore {
    fn fetch_timeline(&self, query: &TimelineQuery) -> Result<TimelineData, SourceError> {
        let data = self.dataset.timeline(query)?;
        debug!(
            start = %query.window_start,
            end = %query.window_end,
            employees = data.employees.len(),
            "timeline fetched"
        );
        Ok(data)
    }
}

impl AssignmentMutator for JsonFileStore {
    fn patch_assignment(&mut self, id: AssignmentId, patch: &AssignmentPatch) -> Result<(), SourceError> {
        let mut next = self.dataset.clone();
        next.apply_patch(id, patch)?;
        save_dataset(&next, &self.path)?;
        self.dataset = next;
        info!(assignment = %id, ?patch, "assignment patched");
        Ok(())
    }
}

/// Save a dataset to a JSON file.
pub fn save_dataset(dataset: &Dataset, path: &Path) -> Result<(), SourceError> {
    let json = serde_json::to_string_pretty(dataset)?;
    std::fs::write(path, json).map_err(|e| SourceError::io(path, e))
}

/// Load a dataset from a JSON file.
pub fn load_dataset(path: &Path) -> Result<Dataset, SourceError> {
    let json = std::fs::read_to_string(path).map_err(|e| SourceError::io(path, e))?;
    Ok(serde_json::from_str(&json)?)
}
