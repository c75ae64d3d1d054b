//! Window state persistence
//!
//! The state file is best-effort UX data: a missing or corrupt file yields
//! defaults and a failed write is logged and dropped.

use crate::error::{ShellError, ShellResult};
use crate::types::WindowState;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads and writes [`WindowState`] as a JSON file
#[derive(Debug, Clone)]
pub struct WindowStateStore {
    path: PathBuf,
}

impl WindowStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the last saved state, or defaults when there is none
    pub fn load(&self) -> WindowState {
        if !self.path.exists() {
            log::debug!("No window state at {:?}, using defaults", self.path);
            return WindowState::default();
        }

        match self.try_load() {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Failed to load window state: {}", e);
                WindowState::default()
            }
        }
    }

    /// Overwrite the persisted state. Failures are logged, never returned.
    pub fn save(&self, state: &WindowState) {
        if let Err(e) = self.try_save(state) {
            log::warn!("Failed to save window state: {}", e);
        }
    }

    pub fn try_load(&self) -> ShellResult<WindowState> {
        let contents = fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents).map_err(|e| {
            ShellError::persistence(format!("Corrupt window state {:?}: {}", self.path, e))
        })
    }

    pub fn try_save(&self, state: &WindowState) -> ShellResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(state).map_err(|e| {
            ShellError::persistence(format!("Failed to serialize window state: {}", e))
        })?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
