use std::path::PathBuf;

use chrono::NaiveDate;
use uuid::Uuid;

/// Failures reported by the timeline data source or the mutation collaborator.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid timeline data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("assignment {0} not found")]
    UnknownAssignment(Uuid),
    #[error("employee {0} not found")]
    UnknownEmployee(Uuid),
    #[error("unknown team {0:?}")]
    UnknownTeam(String),
    #[error("start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

impl SourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failures while reading or writing the persisted planner settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no configuration directory available on this platform")]
    NoConfigDir,
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
