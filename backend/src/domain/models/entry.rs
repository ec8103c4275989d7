//! Domain model for a tab entry.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::tab::TabType;

/// Priority level for todo entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Category-specific entry payload. The variant must always match the
/// owning tab's type; the lifecycle service enforces this on every add
/// and update.
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
        #[serde(default, skip_serializing_if = "Option::is_none")]
        meter_reading: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Service { expense: f64, note: String },
    #[serde(rename_all = "camelCase")]
    Water { received: bool },
    #[serde(rename_all = "camelCase")]
    Todo {
        task: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        due_date: Option<NaiveDate>,
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

impl EntryKind {
    /// The tab type this payload belongs to.
    pub fn tab_type(&self) -> TabType {
        match self {
            EntryKind::Milk { .. } => TabType::Milk,
            EntryKind::Petrol { .. } => TabType::Petrol,
            EntryKind::Service { .. } => TabType::Service,
            EntryKind::Water { .. } => TabType::Water,
            EntryKind::Todo { .. } => TabType::Todo,
            EntryKind::Expense { .. } => TabType::Expense,
            EntryKind::Custom { .. } => TabType::Custom,
        }
    }

    /// Recompute derived numeric fields from their inputs. Derived
    /// fields are never user-editable; this runs after every mutation.
    pub fn recompute_derived(&mut self) {
        match self {
            EntryKind::Milk {
                received,
                quantity,
                rate,
                total,
            } => {
                if !*received {
                    *quantity = 0.0;
                }
                *total = if *received { *rate * *quantity } else { 0.0 };
            }
            EntryKind::Petrol {
                rate,
                total,
                quantity,
                ..
            } => {
                *quantity = if *rate > 0.0 { *total / *rate } else { 0.0 };
            }
            _ => {}
        }
    }
}

/// One dated, timestamped record within a tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    /// Creation instant. Assigned once by the lifecycle service.
    pub timestamp: DateTime<Utc>,
    /// User-supplied calendar date; the reconciliation join key for
    /// daily-grid tab types.
    pub date: NaiveDate,
    #[serde(flatten)]
    pub kind: EntryKind,
}

impl Entry {
    /// Generate a unique entry ID.
    /// Format: ent-<timestamp_ms>-<random_suffix>
    pub fn generate_id(timestamp_ms: u64) -> String {
        format!("ent-{}-{}", timestamp_ms, super::random_suffix(4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn milk_total_follows_rate_and_quantity() {
        let mut kind = EntryKind::Milk {
            received: true,
            quantity: 3.0,
            rate: 60.0,
            total: 0.0,
        };
        kind.recompute_derived();
        assert_eq!(
            kind,
            EntryKind::Milk {
                received: true,
                quantity: 3.0,
                rate: 60.0,
                total: 180.0,
            }
        );
    }

    #[test]
    fn unreceived_milk_zeroes_quantity_and_total() {
        let mut kind = EntryKind::Milk {
            received: false,
            quantity: 3.0,
            rate: 60.0,
            total: 180.0,
        };
        kind.recompute_derived();
        assert_eq!(
            kind,
            EntryKind::Milk {
                received: false,
                quantity: 0.0,
                rate: 60.0,
                total: 0.0,
            }
        );
    }

    #[test]
    fn petrol_quantity_is_total_over_rate() {
        let mut kind = EntryKind::Petrol {
            rate: 100.0,
            total: 550.0,
            quantity: 0.0,
            meter_reading: None,
        };
        kind.recompute_derived();
        match kind {
            EntryKind::Petrol { quantity, .. } => assert_eq!(quantity, 5.5),
            _ => unreachable!(),
        }
    }

    #[test]
    fn entry_serializes_with_type_tag_and_camel_case() {
        let entry = Entry {
            id: "ent-1-abcd".to_string(),
            timestamp: "2024-03-02T10:00:00Z".parse().unwrap(),
            date: date("2024-03-02"),
            kind: EntryKind::Todo {
                task: "Buy filters".to_string(),
                due_date: Some(date("2024-03-10")),
                priority: Priority::High,
                completed: false,
            },
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "todo");
        assert_eq!(json["dueDate"], "2024-03-10");
        assert_eq!(json["priority"], "high");

        let back: Entry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn petrol_and_milk_deserialize_unambiguously() {
        // Both carry rate/total/quantity; the tag keeps them apart.
        let milk: EntryKind = serde_json::from_str(
            r#"{"type":"milk","received":true,"quantity":2.0,"rate":55.0,"total":110.0}"#,
        )
        .unwrap();
        assert_eq!(milk.tab_type(), TabType::Milk);

        let petrol: EntryKind = serde_json::from_str(
            r#"{"type":"petrol","rate":100.0,"total":500.0,"quantity":5.0}"#,
        )
        .unwrap();
        assert_eq!(petrol.tab_type(), TabType::Petrol);
    }
}
