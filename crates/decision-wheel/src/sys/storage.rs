use crate::config::project_dirs;
use crate::wheel::model::{OptionId, WheelOption};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// What survives between sessions: saved options and wheel membership.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelSnapshot {
    #[serde(default)]
    pub options: Vec<WheelOption>,
    #[serde(default)]
    pub wheel: Vec<OptionId>,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to determine data directory")]
    DataDirNotFound,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Malformed wheel data: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait OptionRepository {
    fn load(&self) -> Result<WheelSnapshot, StorageError>;
    fn save(&mut self, snapshot: &WheelSnapshot) -> Result<(), StorageError>;
}

/// Keeps the snapshot in memory. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    snapshot: Arc<Mutex<WheelSnapshot>>,
}

impl MemoryRepository {
    pub fn new(snapshot: WheelSnapshot) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(snapshot)),
        }
    }

    pub fn snapshot(&self) -> WheelSnapshot {
        self.snapshot.lock().clone()
    }
}

impl OptionRepository for MemoryRepository {
    fn load(&self) -> Result<WheelSnapshot, StorageError> {
        Ok(self.snapshot())
    }

    fn save(&mut self, snapshot: &WheelSnapshot) -> Result<(), StorageError> {
        *self.snapshot.lock() = snapshot.clone();
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> Result<PathBuf, StorageError> {
        let proj_dirs = project_dirs().ok_or(StorageError::DataDirNotFound)?;
        Ok(proj_dirs.data_dir().join("wheel.json"))
    }

    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OptionRepository for JsonFileRepository {
    fn load(&self) -> Result<WheelSnapshot, StorageError> {
        if !self.path.exists() {
            log::debug!("No wheel data at {}, starting empty", self.path.display());
            return Ok(WheelSnapshot::default());
        }
        let raw = fs_err::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&mut self, snapshot: &WheelSnapshot) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs_err::create_dir_all(parent)?;
        }
        // write aside, then swap in
        let tmp = self.path.with_extension("json.tmp");
        fs_err::write(&tmp, serde_json::to_string_pretty(snapshot)?)?;
        fs_err::rename(&tmp, &self.path)?;
        Ok(())
    }
}
