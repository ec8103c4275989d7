//! Domain model for a tracking tab.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::entry::Entry;

/// The closed set of tab categories. Immutable once a tab is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabType {
    Milk,
    Petrol,
    Service,
    Water,
    Todo,
    Expense,
    Custom,
}

impl TabType {
    /// Parse the wire form used at tab creation. Returns `None` for
    /// anything outside the closed set.
    pub fn parse(value: &str) -> Option<TabType> {
        match value {
            "milk" => Some(TabType::Milk),
            "petrol" => Some(TabType::Petrol),
            "service" => Some(TabType::Service),
            "water" => Some(TabType::Water),
            "todo" => Some(TabType::Todo),
            "expense" => Some(TabType::Expense),
            "custom" => Some(TabType::Custom),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TabType::Milk => "milk",
            TabType::Petrol => "petrol",
            TabType::Service => "service",
            TabType::Water => "water",
            TabType::Todo => "todo",
            TabType::Expense => "expense",
            TabType::Custom => "custom",
        }
    }
}

impl fmt::Display for TabType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category-specific configuration. Every field is optional so the same
/// struct doubles as a shallow-merge patch: `Some` replaces, `None`
/// leaves the stored value alone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

/// A user-defined tracking category instance with its entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub tab_type: TabType,
    #[serde(default)]
    pub settings: TabSettings,
    /// Most recent first; new entries are prepended.
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Tab {
    /// Generate a unique tab ID.
    /// Format: tab-<timestamp_ms>-<random_suffix>
    pub fn generate_id(timestamp_ms: u64) -> String {
        format!("tab-{}-{}", timestamp_ms, super::random_suffix(4))
    }

    pub fn entry(&self, entry_id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == entry_id)
    }

    pub fn entry_mut(&mut self, entry_id: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.id == entry_id)
    }

    /// Look up the persisted entry for a calendar date. For reconciled
    /// tab types there is at most one.
    pub fn entry_for_date(&self, date: NaiveDate) -> Option<&Entry> {
        self.entries.iter().find(|e| e.date == date)
    }

    /// Remove an entry by id. Returns true if it was present.
    pub fn remove_entry(&mut self, entry_id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != entry_id);
        self.entries.len() != before
    }
}
