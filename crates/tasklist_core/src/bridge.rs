use crate::config::Config;
use crate::error::AppError;
use crate::model::Task;
use crate::storage::json_store;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;

/// Moves the task collection between memory and the store file without
/// blocking the intent path. Loads and saves run on the blocking pool;
/// failures are logged and swallowed, in-memory state stays authoritative.
#[derive(Debug, Clone)]
pub struct PersistenceBridge {
    path: PathBuf,
}

impl PersistenceBridge {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Ok(Self::new(json_store::store_path(config)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fetch the stored collection. Absent or unreadable stores both come
    /// back as an empty collection; unreadable ones are logged.
    pub async fn load(&self) -> Vec<Task> {
        let path = self.path.clone();
        match tokio::task::spawn_blocking(move || json_store::load_tasks(&path)).await {
            Ok(Ok(tasks)) => tasks,
            Ok(Err(err)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "task store unreadable, starting empty"
                );
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(error = %err, "task store load worker failed, starting empty");
                Vec::new()
            }
        }
    }

    /// Fire-and-forget overwrite of the store with the full snapshot.
    pub fn spawn_save(&self, tasks: Vec<Task>) -> JoinHandle<()> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(err) = json_store::save_tasks(&path, &tasks) {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to persist tasks"
                );
            }
        })
    }
}
