//! Storage abstraction for the tracker.
//!
//! The domain layer only sees these traits; the JSON-file backend lives
//! behind them. Everything is synchronous, the store is an opaque
//! snapshot the services load once at startup and write back whole
//! after each mutation.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::models::tab::Tab;

/// The complete persisted state: the tab collection plus the id of the
/// tab the user last had selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSnapshot {
    #[serde(default)]
    pub tabs: Vec<Tab>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_tab_id: Option<String>,
}

impl TrackerSnapshot {
    /// Repair the active-tab pointer after a load or a delete: a
    /// pointer at a tab that no longer exists falls back to the first
    /// tab, or to none when the collection is empty.
    pub fn normalize_active_tab(&mut self) {
        let valid = self
            .active_tab_id
            .as_ref()
            .map(|id| self.tabs.iter().any(|t| &t.id == id))
            .unwrap_or(false);
        if !valid {
            self.active_tab_id = self.tabs.first().map(|t| t.id.clone());
        }
    }

    pub fn tab(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    pub fn tab_mut(&mut self, tab_id: &str) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == tab_id)
    }
}

/// Repository for loading and saving the tracker snapshot.
pub trait TabStorage {
    /// Load the stored snapshot. A missing store is not an error; it
    /// yields an empty snapshot.
    fn load(&self) -> Result<TrackerSnapshot>;

    /// Persist the full snapshot, replacing whatever was stored.
    fn save(&self, snapshot: &TrackerSnapshot) -> Result<()>;
}

/// Storage backend factory. Generic plumbing so the services stay
/// agnostic of where the bytes live.
pub trait Connection: Clone + Send + Sync + 'static {
    type TabRepository: TabStorage + Clone + Send + Sync;

    fn create_tab_repository(&self) -> Self::TabRepository;
}
