//! Conversions from domain entities to the shared DTO types.
//!
//! The shared crate speaks plain strings for dates so presentation
//! layers never need a date library; these mappers are where the
//! formatting happens.

use crate::domain::models::entry::{Entry, EntryKind, Priority};
use crate::domain::models::tab::{Tab, TabType};

pub struct TabMapper;

impl TabMapper {
    pub fn to_dto(tab: &Tab) -> shared::Tab {
        shared::Tab {
            id: tab.id.clone(),
            name: tab.name.clone(),
            tab_type: Self::tab_type_to_dto(tab.tab_type),
            settings: shared::TabSettings {
                default_rate: tab.settings.default_rate,
                default_quantity: tab.settings.default_quantity,
                categories: tab.settings.categories.clone(),
            },
            entries: tab.entries.iter().map(EntryMapper::to_dto).collect(),
        }
    }

    pub fn tab_type_to_dto(tab_type: TabType) -> shared::TabType {
        match tab_type {
            TabType::Milk => shared::TabType::Milk,
            TabType::Petrol => shared::TabType::Petrol,
            TabType::Service => shared::TabType::Service,
            TabType::Water => shared::TabType::Water,
            TabType::Todo => shared::TabType::Todo,
            TabType::Expense => shared::TabType::Expense,
            TabType::Custom => shared::TabType::Custom,
        }
    }
}

pub struct EntryMapper;

impl EntryMapper {
    pub fn to_dto(entry: &Entry) -> shared::Entry {
        shared::Entry {
            id: entry.id.clone(),
            timestamp: entry.timestamp.to_rfc3339(),
            date: entry.date.format("%Y-%m-%d").to_string(),
            kind: Self::kind_to_dto(&entry.kind),
        }
    }

    pub fn kind_to_dto(kind: &EntryKind) -> shared::EntryKind {
        match kind {
            EntryKind::Milk {
                received,
                quantity,
                rate,
                total,
            } => shared::EntryKind::Milk {
                received: *received,
                quantity: *quantity,
                rate: *rate,
                total: *total,
            },
            EntryKind::Petrol {
                rate,
                total,
                quantity,
                meter_reading,
            } => shared::EntryKind::Petrol {
                rate: *rate,
                total: *total,
                quantity: *quantity,
                meter_reading: meter_reading.clone(),
            },
            EntryKind::Service { expense, note } => shared::EntryKind::Service {
                expense: *expense,
                note: note.clone(),
            },
            EntryKind::Water { received } => shared::EntryKind::Water {
                received: *received,
            },
            EntryKind::Todo {
                task,
                due_date,
                priority,
                completed,
            } => shared::EntryKind::Todo {
                task: task.clone(),
                due_date: due_date.map(|d| d.format("%Y-%m-%d").to_string()),
                priority: match priority {
                    Priority::Low => shared::Priority::Low,
                    Priority::Medium => shared::Priority::Medium,
                    Priority::High => shared::Priority::High,
                },
                completed: *completed,
            },
            EntryKind::Expense {
                item,
                amount,
                category,
            } => shared::EntryKind::Expense {
                item: item.clone(),
                amount: *amount,
                category: category.clone(),
            },
            EntryKind::Custom { note } => shared::EntryKind::Custom { note: note.clone() },
        }
    }
}
