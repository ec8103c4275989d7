//! Shared DTO types for the personal tracker.
//!
//! These types cross the boundary between the backend domain layer and any
//! presentation layer (and the export projector). Dates are plain strings
//! here (`YYYY-MM-DD` for calendar dates, RFC 3339 for timestamps) so that
//! consumers never need a date library; the backend owns all date math.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// The closed set of tab categories.
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

/// Priority level for todo entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Category-specific tab configuration. Fields not relevant to a tab's
/// category are simply absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

/// A user-defined tracking category instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub tab_type: TabType,
    pub settings: TabSettings,
    /// Entries in default display order (most recent first).
    pub entries: Vec<Entry>,
}

/// One dated record within a tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    /// Creation instant, RFC 3339.
    pub timestamp: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    #[serde(flatten)]
    pub kind: EntryKind,
}

/// Category-specific entry payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntryKind {
    #[serde(rename_all = "camelCase")]
    Milk {
        received: bool,
        quantity: f64,
        rate: f64,
        /// Derived: `rate * quantity` when received, else 0.
        total: f64,
    },
    #[serde(rename_all = "camelCase")]
    Petrol {
        rate: f64,
        total: f64,
        /// Derived: `total / rate`.
        quantity: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        meter_reading: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Service { expense: f64, note: String },
    #[serde(rename_all = "camelCase")]
    Water { received: bool },
    #[serde(rename_all = "camelCase")]
    Todo {
        task: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        due_date: Option<String>,
        priority: Priority,
        completed: bool,
    },
    #[serde(rename_all = "camelCase")]
    Expense {
        item: String,
        amount: f64,
        category: String,
    },
    #[serde(rename_all = "camelCase")]
    Custom { note: String },
}

/// A monthly calendar view for a daily-grid tab: exactly one row per
/// calendar day of the month, whether or not a record is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub month: u32,
    pub year: u32,
    pub rows: Vec<DayRow>,
    pub summary: MonthSummary,
}

/// A single day row in a [`MonthView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRow {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Backing entry id; `None` for synthesized placeholder rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
    /// Whether this row is backed by a persisted entry.
    pub persisted: bool,
    pub kind: EntryKind,
}

/// Month-level aggregates recomputed on every reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    /// Sum of derived totals across rows with a truthy received flag.
    pub total_amount: f64,
    /// Count of rows with a truthy received flag.
    pub days_marked: u32,
    /// Sum of unit quantities across received rows.
    pub total_quantity: f64,
}

/// Per-category breakdown entry for an expense month summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: String,
    pub total: f64,
    pub count: u32,
}

/// Monthly statistics for an expense tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseMonthSummary {
    pub month: u32,
    pub year: u32,
    pub total_amount: f64,
    pub entry_count: usize,
    pub average_per_entry: f64,
    /// All categories seen this month, descending by total. Ties keep
    /// first-encounter order.
    pub categories: Vec<CategorySummary>,
    /// The top three contributing categories.
    pub top_categories: Vec<CategorySummary>,
}

/// The current focus month for calendar navigation. Kept in memory only,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFocusDate {
    pub month: u32,
    pub year: u32,
}

impl Default for CalendarFocusDate {
    fn default() -> Self {
        let now = chrono::Local::now();
        Self {
            month: now.month(),
            year: now.year() as u32,
        }
    }
}

/// One selectable month in the month picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthOption {
    /// Machine value, `YYYY-MM`.
    pub value: String,
    /// Human label, e.g. "March 2024".
    pub label: String,
}

/// A multi-section tabular export of the full tab collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub title: String,
    /// Generation date, human formatted.
    pub generated_on: String,
    pub sections: Vec<ExportSection>,
}

/// One export section: a single tab projected into columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSection {
    /// Section title, `"{tab name} ({type})"`.
    pub title: String,
    pub headers: Vec<String>,
    /// One row per persisted entry; empty when the tab has no entries.
    pub rows: Vec<Vec<String>>,
}

/// Result of writing an export document to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportToPathResult {
    pub file_path: String,
    pub section_count: usize,
}
