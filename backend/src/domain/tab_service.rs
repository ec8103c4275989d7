//! Tab and entry lifecycle service.
//!
//! The single owner of the tab collection: every create, update, delete
//! and day-mark goes through here, and this is the only place ids and
//! creation timestamps are assigned. After each successful mutation the
//! whole snapshot is written back to storage; a failed write is logged
//! and remembered but never rolls back or blocks the in-memory state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use log::{debug, info, warn};

use crate::domain::commands::entries::{
    AddEntryCommand, DeleteEntryCommand, EntryPatch, MarkDayCommand, UpdateEntryCommand,
};
use crate::domain::commands::tabs::{CreateTabCommand, DeleteTabCommand, UpdateTabCommand};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::entry::{Entry, EntryKind};
use crate::domain::models::tab::{Tab, TabType};
use crate::domain::reconcile::policy_for;
use crate::domain::settings::{allowed_categories, default_settings_for, merge_settings};
use crate::storage::traits::{Connection, TabStorage, TrackerSnapshot};

#[derive(Clone)]
pub struct TabService<C: Connection> {
    repository: C::TabRepository,
    state: Arc<Mutex<TrackerSnapshot>>,
    save_failed: Arc<AtomicBool>,
}

impl<C: Connection> TabService<C> {
    pub fn new(connection: &C) -> DomainResult<Self> {
        let repository = connection.create_tab_repository();
        let snapshot = repository.load()?;
        info!(
            "📋 TABS: loaded {} tabs (active: {:?})",
            snapshot.tabs.len(),
            snapshot.active_tab_id
        );
        Ok(Self {
            repository,
            state: Arc::new(Mutex::new(snapshot)),
            save_failed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Whether any write-back since startup has failed. Sticky until
    /// the process restarts; the UI surfaces it as a warning banner.
    pub fn save_failed(&self) -> bool {
        self.save_failed.load(Ordering::Relaxed)
    }

    pub fn list_tabs(&self) -> Vec<Tab> {
        self.state.lock().unwrap().tabs.clone()
    }

    pub fn get_tab(&self, tab_id: &str) -> DomainResult<Tab> {
        self.state
            .lock()
            .unwrap()
            .tab(tab_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("tab {tab_id}")))
    }

    pub fn active_tab_id(&self) -> Option<String> {
        self.state.lock().unwrap().active_tab_id.clone()
    }

    pub fn set_active_tab(&self, tab_id: &str) -> DomainResult<()> {
        {
            let mut state = self.state.lock().unwrap();
            if state.tab(tab_id).is_none() {
                return Err(DomainError::NotFound(format!("tab {tab_id}")));
            }
            state.active_tab_id = Some(tab_id.to_string());
        }
        self.persist();
        Ok(())
    }

    pub fn create_tab(&self, command: CreateTabCommand) -> DomainResult<Tab> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("tab name is required".to_string()));
        }
        let tab_type = TabType::parse(&command.tab_type).ok_or_else(|| {
            DomainError::Validation(format!("unknown tab type '{}'", command.tab_type))
        })?;

        let tab = Tab {
            id: Tab::generate_id(Utc::now().timestamp_millis() as u64),
            name: name.to_string(),
            tab_type,
            settings: default_settings_for(tab_type),
            entries: Vec::new(),
        };

        {
            let mut state = self.state.lock().unwrap();
            state.tabs.push(tab.clone());
            // A freshly created tab is what the user works in next.
            state.active_tab_id = Some(tab.id.clone());
        }
        info!("📋 TABS: created {} tab '{}' ({})", tab_type, tab.name, tab.id);
        self.persist();
        Ok(tab)
    }

    pub fn update_tab(&self, command: UpdateTabCommand) -> DomainResult<Tab> {
        let updated = {
            let mut state = self.state.lock().unwrap();
            let tab = state
                .tab_mut(&command.tab_id)
                .ok_or_else(|| DomainError::NotFound(format!("tab {}", command.tab_id)))?;

            if let Some(name) = &command.name {
                let name = name.trim();
                if name.is_empty() {
                    return Err(DomainError::Validation("tab name is required".to_string()));
                }
                tab.name = name.to_string();
            }
            if let Some(patch) = &command.settings {
                merge_settings(&mut tab.settings, patch);
            }
            tab.clone()
        };
        debug!("📋 TABS: updated tab {}", updated.id);
        self.persist();
        Ok(updated)
    }

    pub fn delete_tab(&self, command: DeleteTabCommand) -> DomainResult<()> {
        {
            let mut state = self.state.lock().unwrap();
            let before = state.tabs.len();
            state.tabs.retain(|t| t.id != command.tab_id);
            if state.tabs.len() == before {
                return Err(DomainError::NotFound(format!("tab {}", command.tab_id)));
            }
            state.normalize_active_tab();
        }
        info!("📋 TABS: deleted tab {}", command.tab_id);
        self.persist();
        Ok(())
    }

    pub fn add_entry(&self, command: AddEntryCommand) -> DomainResult<Entry> {
        let mut kind = command.kind;
        let entry = {
            let mut state = self.state.lock().unwrap();
            let tab = state
                .tab_mut(&command.tab_id)
                .ok_or_else(|| DomainError::NotFound(format!("tab {}", command.tab_id)))?;

            if kind.tab_type() != tab.tab_type {
                return Err(DomainError::Validation(format!(
                    "entry kind '{}' does not match tab type '{}'",
                    kind.tab_type(),
                    tab.tab_type
                )));
            }
            validate_kind(&kind, tab)?;
            if policy_for(tab.tab_type).is_some() && tab.entry_for_date(command.date).is_some() {
                return Err(DomainError::Validation(format!(
                    "an entry for {} already exists in this tab",
                    command.date
                )));
            }

            kind.recompute_derived();
            let entry = Entry {
                id: Entry::generate_id(Utc::now().timestamp_millis() as u64),
                timestamp: Utc::now(),
                date: command.date,
                kind,
            };
            // Newest first.
            tab.entries.insert(0, entry.clone());
            entry
        };
        debug!("📋 TABS: added entry {} to tab {}", entry.id, command.tab_id);
        self.persist();
        Ok(entry)
    }

    pub fn update_entry(&self, command: UpdateEntryCommand) -> DomainResult<Entry> {
        let updated = {
            let mut state = self.state.lock().unwrap();
            let tab = state
                .tab_mut(&command.tab_id)
                .ok_or_else(|| DomainError::NotFound(format!("tab {}", command.tab_id)))?;

            if let Some(new_date) = command.date {
                let occupied = policy_for(tab.tab_type).is_some()
                    && tab
                        .entries
                        .iter()
                        .any(|e| e.date == new_date && e.id != command.entry_id);
                if occupied {
                    return Err(DomainError::Validation(format!(
                        "an entry for {new_date} already exists in this tab"
                    )));
                }
            }

            let tab_snapshot = tab.clone();
            let entry = tab
                .entry_mut(&command.entry_id)
                .ok_or_else(|| DomainError::NotFound(format!("entry {}", command.entry_id)))?;

            // Patch and validate a copy first; the stored entry stays
            // untouched unless every check passes.
            let mut kind = entry.kind.clone();
            apply_patch(&mut kind, &command.patch)?;
            kind.recompute_derived();
            validate_kind(&kind, &tab_snapshot)?;

            entry.kind = kind;
            if let Some(new_date) = command.date {
                entry.date = new_date;
            }
            entry.clone()
        };
        debug!("📋 TABS: updated entry {}", updated.id);
        self.persist();
        Ok(updated)
    }

    pub fn delete_entry(&self, command: DeleteEntryCommand) -> DomainResult<()> {
        {
            let mut state = self.state.lock().unwrap();
            let tab = state
                .tab_mut(&command.tab_id)
                .ok_or_else(|| DomainError::NotFound(format!("tab {}", command.tab_id)))?;
            if !tab.remove_entry(&command.entry_id) {
                return Err(DomainError::NotFound(format!("entry {}", command.entry_id)));
            }
        }
        debug!("📋 TABS: deleted entry {}", command.entry_id);
        self.persist();
        Ok(())
    }

    /// Mark or unmark a calendar day in a daily-grid tab.
    ///
    /// A day with a stored record is always updated in place, whichever
    /// direction the toggle goes; unmarking keeps the record with its
    /// figures zeroed. Marking a day with no record creates one seeded
    /// from the tab's defaults. Unmarking a day with no record is a
    /// no-op and returns `None`.
    pub fn mark_day(&self, command: MarkDayCommand) -> DomainResult<Option<Entry>> {
        let result = {
            let mut state = self.state.lock().unwrap();
            let tab = state
                .tab_mut(&command.tab_id)
                .ok_or_else(|| DomainError::NotFound(format!("tab {}", command.tab_id)))?;
            let policy = policy_for(tab.tab_type).ok_or_else(|| {
                DomainError::Validation(format!(
                    "tab type '{}' has no daily grid",
                    tab.tab_type
                ))
            })?;

            let settings = tab.settings.clone();
            let existing_id = tab.entry_for_date(command.date).map(|e| e.id.clone());
            match existing_id {
                Some(entry_id) => {
                    let entry = tab
                        .entry_mut(&entry_id)
                        .ok_or_else(|| DomainError::NotFound(format!("entry {entry_id}")))?;
                    policy.set_marked(&mut entry.kind, command.marked, &settings);
                    Some(entry.clone())
                }
                None if command.marked => {
                    let entry = Entry {
                        id: Entry::generate_id(Utc::now().timestamp_millis() as u64),
                        timestamp: Utc::now(),
                        date: command.date,
                        kind: policy.marked_entry(&tab.settings),
                    };
                    tab.entries.insert(0, entry.clone());
                    Some(entry)
                }
                None => None,
            }
        };
        if result.is_some() {
            debug!(
                "📋 TABS: day {} in tab {} set to marked={}",
                command.date, command.tab_id, command.marked
            );
            self.persist();
        }
        Ok(result)
    }

    /// Write the current snapshot back to storage. Failure is logged
    /// and latched; the in-memory state stays authoritative.
    fn persist(&self) {
        let snapshot = self.state.lock().unwrap().clone();
        if let Err(err) = self.repository.save(&snapshot) {
            warn!("📋 TABS: failed to save tracker store: {err:#}");
            self.save_failed.store(true, Ordering::Relaxed);
        }
    }
}

fn require_finite(value: f64, field: &str) -> DomainResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::Validation(format!("{field} must be a number")))
    }
}

fn validate_kind(kind: &EntryKind, tab: &Tab) -> DomainResult<()> {
    match kind {
        EntryKind::Milk { quantity, rate, .. } => {
            require_finite(*quantity, "quantity")?;
            require_finite(*rate, "rate")?;
            if *quantity < 0.0 || *rate < 0.0 {
                return Err(DomainError::Validation(
                    "quantity and rate cannot be negative".to_string(),
                ));
            }
        }
        EntryKind::Petrol { rate, total, .. } => {
            require_finite(*rate, "rate")?;
            require_finite(*total, "total")?;
            if *rate <= 0.0 {
                return Err(DomainError::Validation(
                    "rate must be greater than zero".to_string(),
                ));
            }
            if *total < 0.0 {
                return Err(DomainError::Validation(
                    "total cannot be negative".to_string(),
                ));
            }
        }
        EntryKind::Service { expense, note } => {
            require_finite(*expense, "expense")?;
            if *expense < 0.0 {
                return Err(DomainError::Validation(
                    "expense cannot be negative".to_string(),
                ));
            }
            if note.trim().is_empty() {
                return Err(DomainError::Validation("note is required".to_string()));
            }
        }
        EntryKind::Water { .. } => {}
        EntryKind::Todo { task, .. } => {
            if task.trim().is_empty() {
                return Err(DomainError::Validation("task is required".to_string()));
            }
        }
        EntryKind::Expense {
            item,
            amount,
            category,
        } => {
            if item.trim().is_empty() {
                return Err(DomainError::Validation("item is required".to_string()));
            }
            require_finite(*amount, "amount")?;
            if *amount <= 0.0 {
                return Err(DomainError::Validation(
                    "amount must be greater than zero".to_string(),
                ));
            }
            if !allowed_categories(&tab.settings).iter().any(|c| c == category) {
                return Err(DomainError::Validation(format!(
                    "unknown category '{category}'"
                )));
            }
        }
        EntryKind::Custom { note } => {
            if note.trim().is_empty() {
                return Err(DomainError::Validation("note is required".to_string()));
            }
        }
    }
    Ok(())
}

fn apply_patch(kind: &mut EntryKind, patch: &EntryPatch) -> DomainResult<()> {
    match (kind, patch) {
        (
            EntryKind::Milk {
                received,
                quantity,
                rate,
                ..
            },
            EntryPatch::Milk {
                received: p_received,
                quantity: p_quantity,
                rate: p_rate,
            },
        ) => {
            if let Some(v) = p_received {
                *received = *v;
            }
            if let Some(v) = p_quantity {
                *quantity = *v;
            }
            if let Some(v) = p_rate {
                *rate = *v;
            }
        }
        (
            EntryKind::Petrol {
                rate,
                total,
                meter_reading,
                ..
            },
            EntryPatch::Petrol {
                rate: p_rate,
                total: p_total,
                meter_reading: p_meter,
            },
        ) => {
            if let Some(v) = p_rate {
                *rate = *v;
            }
            if let Some(v) = p_total {
                *total = *v;
            }
            if let Some(v) = p_meter {
                *meter_reading = v.clone();
            }
        }
        (
            EntryKind::Service { expense, note },
            EntryPatch::Service {
                expense: p_expense,
                note: p_note,
            },
        ) => {
            if let Some(v) = p_expense {
                *expense = *v;
            }
            if let Some(v) = p_note {
                *note = v.clone();
            }
        }
        (EntryKind::Water { received }, EntryPatch::Water { received: p_received }) => {
            if let Some(v) = p_received {
                *received = *v;
            }
        }
        (
            EntryKind::Todo {
                task,
                due_date,
                priority,
                completed,
            },
            EntryPatch::Todo {
                task: p_task,
                due_date: p_due,
                priority: p_priority,
                completed: p_completed,
            },
        ) => {
            if let Some(v) = p_task {
                *task = v.clone();
            }
            if let Some(v) = p_due {
                *due_date = *v;
            }
            if let Some(v) = p_priority {
                *priority = *v;
            }
            if let Some(v) = p_completed {
                *completed = *v;
            }
        }
        (
            EntryKind::Expense {
                item,
                amount,
                category,
            },
            EntryPatch::Expense {
                item: p_item,
                amount: p_amount,
                category: p_category,
            },
        ) => {
            if let Some(v) = p_item {
                *item = v.clone();
            }
            if let Some(v) = p_amount {
                *amount = *v;
            }
            if let Some(v) = p_category {
                *category = v.clone();
            }
        }
        (EntryKind::Custom { note }, EntryPatch::Custom { note: p_note }) => {
            if let Some(v) = p_note {
                *note = v.clone();
            }
        }
        _ => {
            return Err(DomainError::Validation(
                "patch does not match the entry's kind".to_string(),
            ))
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::entry::Priority;
    use crate::domain::models::tab::TabSettings;
    use crate::storage::json::JsonConnection;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn service(dir: &TempDir) -> TabService<JsonConnection> {
        TabService::new(&JsonConnection::new(dir.path())).unwrap()
    }

    fn create(service: &TabService<JsonConnection>, name: &str, tab_type: &str) -> Tab {
        service
            .create_tab(CreateTabCommand {
                name: name.to_string(),
                tab_type: tab_type.to_string(),
            })
            .unwrap()
    }

    #[test]
    fn create_tab_seeds_defaults_and_becomes_active() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        let milk = create(&service, "Milk", "milk");
        assert_eq!(milk.settings.default_rate, Some(60.0));
        assert_eq!(service.active_tab_id(), Some(milk.id.clone()));

        let petrol = create(&service, "Petrol", "petrol");
        assert_eq!(petrol.settings.default_rate, Some(100.0));
        assert_eq!(service.active_tab_id(), Some(petrol.id));

        let todo = create(&service, "Chores", "todo");
        assert_eq!(todo.settings, TabSettings::default());
    }

    #[test]
    fn create_tab_rejects_unknown_type_and_blank_name() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        let err = service
            .create_tab(CreateTabCommand {
                name: "Groceries".to_string(),
                tab_type: "groceries".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = service
            .create_tab(CreateTabCommand {
                name: "   ".to_string(),
                tab_type: "milk".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(service.list_tabs().is_empty());
    }

    #[test]
    fn add_entry_rejects_mismatched_kind() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        let tab = create(&service, "Milk", "milk");

        let err = service
            .add_entry(AddEntryCommand {
                tab_id: tab.id,
                date: date("2024-03-02"),
                kind: EntryKind::Water { received: true },
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn entries_are_kept_newest_first() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        let tab = create(&service, "Chores", "todo");

        for task in ["first", "second", "third"] {
            service
                .add_entry(AddEntryCommand {
                    tab_id: tab.id.clone(),
                    date: date("2024-03-02"),
                    kind: EntryKind::Todo {
                        task: task.to_string(),
                        due_date: None,
                        priority: Priority::Medium,
                        completed: false,
                    },
                })
                .unwrap();
        }

        let tab = service.get_tab(&tab.id).unwrap();
        let tasks: Vec<&str> = tab
            .entries
            .iter()
            .map(|e| match &e.kind {
                EntryKind::Todo { task, .. } => task.as_str(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(tasks, vec!["third", "second", "first"]);
    }

    #[test]
    fn daily_grid_tabs_refuse_a_second_entry_for_the_same_date() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        let tab = create(&service, "Milk", "milk");

        let kind = EntryKind::Milk {
            received: true,
            quantity: 3.0,
            rate: 60.0,
            total: 0.0,
        };
        service
            .add_entry(AddEntryCommand {
                tab_id: tab.id.clone(),
                date: date("2024-03-02"),
                kind: kind.clone(),
            })
            .unwrap();
        let err = service
            .add_entry(AddEntryCommand {
                tab_id: tab.id,
                date: date("2024-03-02"),
                kind,
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn marking_an_unrecorded_day_creates_a_seeded_entry() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        let tab = create(&service, "Milk", "milk");
        service
            .update_tab(UpdateTabCommand {
                tab_id: tab.id.clone(),
                settings: Some(TabSettings {
                    default_quantity: Some(3.0),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .unwrap();

        let entry = service
            .mark_day(MarkDayCommand {
                tab_id: tab.id.clone(),
                date: date("2024-03-05"),
                marked: true,
            })
            .unwrap()
            .expect("marking should create an entry");
        assert_eq!(
            entry.kind,
            EntryKind::Milk {
                received: true,
                quantity: 3.0,
                rate: 60.0,
                total: 180.0,
            }
        );
        assert_eq!(service.get_tab(&tab.id).unwrap().entries.len(), 1);
    }

    #[test]
    fn unmarking_updates_in_place_and_never_deletes() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        let tab = create(&service, "Water", "water");

        let marked = service
            .mark_day(MarkDayCommand {
                tab_id: tab.id.clone(),
                date: date("2024-03-05"),
                marked: true,
            })
            .unwrap()
            .unwrap();
        let unmarked = service
            .mark_day(MarkDayCommand {
                tab_id: tab.id.clone(),
                date: date("2024-03-05"),
                marked: false,
            })
            .unwrap()
            .expect("the record must survive the unmark");
        assert_eq!(unmarked.id, marked.id);
        assert_eq!(unmarked.kind, EntryKind::Water { received: false });
        assert_eq!(service.get_tab(&tab.id).unwrap().entries.len(), 1);
    }

    #[test]
    fn unmarking_an_unrecorded_day_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        let tab = create(&service, "Milk", "milk");

        let result = service
            .mark_day(MarkDayCommand {
                tab_id: tab.id.clone(),
                date: date("2024-03-05"),
                marked: false,
            })
            .unwrap();
        assert_eq!(result, None);
        assert!(service.get_tab(&tab.id).unwrap().entries.is_empty());
    }

    #[test]
    fn mark_day_rejects_non_grid_tabs() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        let tab = create(&service, "Fuel", "petrol");

        let err = service
            .mark_day(MarkDayCommand {
                tab_id: tab.id,
                date: date("2024-03-05"),
                marked: true,
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn expense_entries_validate_against_the_category_list() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        let tab = create(&service, "Spending", "expense");

        // Built-in category list applies when none is configured.
        service
            .add_entry(AddEntryCommand {
                tab_id: tab.id.clone(),
                date: date("2024-03-02"),
                kind: EntryKind::Expense {
                    item: "Lunch".to_string(),
                    amount: 150.0,
                    category: "Food & Dining".to_string(),
                },
            })
            .unwrap();
        let err = service
            .add_entry(AddEntryCommand {
                tab_id: tab.id,
                date: date("2024-03-03"),
                kind: EntryKind::Expense {
                    item: "Lunch".to_string(),
                    amount: 150.0,
                    category: "Gambling".to_string(),
                },
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn update_entry_recomputes_derived_fields() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        let tab = create(&service, "Fuel", "petrol");

        let entry = service
            .add_entry(AddEntryCommand {
                tab_id: tab.id.clone(),
                date: date("2024-03-02"),
                kind: EntryKind::Petrol {
                    rate: 100.0,
                    total: 500.0,
                    quantity: 0.0,
                    meter_reading: None,
                },
            })
            .unwrap();

        let updated = service
            .update_entry(UpdateEntryCommand {
                tab_id: tab.id,
                entry_id: entry.id,
                date: None,
                patch: EntryPatch::Petrol {
                    rate: None,
                    total: Some(550.0),
                    meter_reading: Some(Some("42150".to_string())),
                },
            })
            .unwrap();
        assert_eq!(
            updated.kind,
            EntryKind::Petrol {
                rate: 100.0,
                total: 550.0,
                quantity: 5.5,
                meter_reading: Some("42150".to_string()),
            }
        );
    }

    #[test]
    fn rejected_update_leaves_the_entry_untouched() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        let tab = create(&service, "Milk", "milk");

        let entry = service
            .add_entry(AddEntryCommand {
                tab_id: tab.id.clone(),
                date: date("2024-03-02"),
                kind: EntryKind::Milk {
                    received: true,
                    quantity: 3.0,
                    rate: 60.0,
                    total: 0.0,
                },
            })
            .unwrap();

        let err = service
            .update_entry(UpdateEntryCommand {
                tab_id: tab.id.clone(),
                entry_id: entry.id.clone(),
                date: Some(date("2024-03-09")),
                patch: EntryPatch::Milk {
                    received: None,
                    quantity: Some(-5.0),
                    rate: None,
                },
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let stored = service.get_tab(&tab.id).unwrap();
        let stored = stored.entry(&entry.id).unwrap();
        assert_eq!(stored.date, date("2024-03-02"));
        assert_eq!(
            stored.kind,
            EntryKind::Milk {
                received: true,
                quantity: 3.0,
                rate: 60.0,
                total: 180.0,
            }
        );
    }

    #[test]
    fn remarking_a_day_restores_a_usable_quantity() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        let tab = create(&service, "Milk", "milk");
        service
            .update_tab(UpdateTabCommand {
                tab_id: tab.id.clone(),
                settings: Some(TabSettings {
                    default_quantity: Some(3.0),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .unwrap();

        let toggle = |marked| {
            service
                .mark_day(MarkDayCommand {
                    tab_id: tab.id.clone(),
                    date: date("2024-03-05"),
                    marked,
                })
                .unwrap()
                .unwrap()
        };
        let created = toggle(true);
        toggle(false);
        let remarked = toggle(true);

        assert_eq!(remarked.id, created.id);
        assert_eq!(
            remarked.kind,
            EntryKind::Milk {
                received: true,
                quantity: 3.0,
                rate: 60.0,
                total: 180.0,
            }
        );
    }

    #[test]
    fn deleting_the_active_tab_moves_the_pointer() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        let first = create(&service, "Milk", "milk");
        let second = create(&service, "Water", "water");
        assert_eq!(service.active_tab_id(), Some(second.id.clone()));

        service
            .delete_tab(DeleteTabCommand { tab_id: second.id })
            .unwrap();
        assert_eq!(service.active_tab_id(), Some(first.id));
    }

    #[test]
    fn state_survives_a_restart() {
        let dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(dir.path());
        let tab_id = {
            let service = TabService::new(&connection).unwrap();
            let tab = create(&service, "Milk", "milk");
            service
                .mark_day(MarkDayCommand {
                    tab_id: tab.id.clone(),
                    date: date("2024-03-05"),
                    marked: true,
                })
                .unwrap();
            tab.id
        };

        let reopened = TabService::new(&connection).unwrap();
        let tab = reopened.get_tab(&tab_id).unwrap();
        assert_eq!(tab.entries.len(), 1);
        assert_eq!(reopened.active_tab_id(), Some(tab_id));
    }

    #[test]
    fn failed_saves_warn_but_do_not_block_mutations() {
        let dir = TempDir::new().unwrap();
        // A file where the store directory should be makes every save fail.
        let blocker = dir.path().join("store");
        std::fs::write(&blocker, "not a directory").unwrap();
        let service = TabService::new(&JsonConnection::new(&blocker)).unwrap();

        let tab = create(&service, "Milk", "milk");
        assert!(service.save_failed());
        // The in-memory state is intact despite the failed write.
        assert_eq!(service.get_tab(&tab.id).unwrap().name, "Milk");
    }
}
