//! JSON-file repository for the tracker snapshot.
//!
//! The whole store is a single `tracker.json` with two top-level keys,
//! the tab collection and the active-tab pointer. Writes go through a
//! temp file and a rename so a crash mid-write never leaves a truncated
//! store behind.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::storage::traits::{TabStorage, TrackerSnapshot};

const STORE_FILE: &str = "tracker.json";

#[derive(Clone)]
pub struct TabRepository {
    file_path: PathBuf,
}

impl TabRepository {
    pub fn new(base_directory: impl AsRef<Path>) -> Self {
        Self {
            file_path: base_directory.as_ref().join(STORE_FILE),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

impl TabStorage for TabRepository {
    fn load(&self) -> Result<TrackerSnapshot> {
        if !self.file_path.exists() {
            info!(
                "No tracker store at {:?}, starting with an empty snapshot",
                self.file_path
            );
            return Ok(TrackerSnapshot::default());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read tracker store at {:?}", self.file_path))?;
        let mut snapshot: TrackerSnapshot = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse tracker store at {:?}", self.file_path))?;
        snapshot.normalize_active_tab();
        debug!(
            "Loaded {} tabs from {:?} (active: {:?})",
            snapshot.tabs.len(),
            self.file_path,
            snapshot.active_tab_id
        );
        Ok(snapshot)
    }

    fn save(&self, snapshot: &TrackerSnapshot) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create store directory {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(snapshot)
            .context("Failed to serialize tracker snapshot")?;

        // Write-then-rename keeps the previous store intact on failure.
        let temp_path = self.file_path.with_extension("json.tmp");
        fs::write(&temp_path, json)
            .with_context(|| format!("Failed to write temp store at {:?}", temp_path))?;
        fs::rename(&temp_path, &self.file_path)
            .with_context(|| format!("Failed to move store into place at {:?}", self.file_path))?;

        debug!(
            "Saved {} tabs to {:?} (active: {:?})",
            snapshot.tabs.len(),
            self.file_path,
            snapshot.active_tab_id
        );
        Ok(())
    }
}
