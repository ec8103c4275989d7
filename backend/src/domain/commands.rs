//! Domain-level command and query types.
//!
//! These structs are consumed by the services inside the domain layer.
//! A presentation layer maps its own input types onto these before
//! calling the services.

pub mod tabs {
    use crate::domain::models::tab::TabSettings;

    /// Input for creating a new tab. The type is the wire string so the
    /// closed-set check stays inside the lifecycle service.
    #[derive(Debug, Clone)]
    pub struct CreateTabCommand {
        pub name: String,
        pub tab_type: String,
    }

    /// Partial update for a tab. Absent fields are untouched; the
    /// settings patch merges field by field.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateTabCommand {
        pub tab_id: String,
        pub name: Option<String>,
        pub settings: Option<TabSettings>,
    }

    /// Input for deleting a tab. Confirmation is the caller's concern;
    /// the service trusts that it already happened.
    #[derive(Debug, Clone)]
    pub struct DeleteTabCommand {
        pub tab_id: String,
    }
}

pub mod entries {
    use crate::domain::models::entry::{EntryKind, Priority};
    use chrono::NaiveDate;

    /// Input for adding an entry. Derived fields inside `kind` are
    /// recomputed by the service regardless of what the caller set.
    #[derive(Debug, Clone)]
    pub struct AddEntryCommand {
        pub tab_id: String,
        pub date: NaiveDate,
        pub kind: EntryKind,
    }

    /// Partial update for an entry. The patch variant must match the
    /// entry's kind.
    #[derive(Debug, Clone)]
    pub struct UpdateEntryCommand {
        pub tab_id: String,
        pub entry_id: String,
        pub date: Option<NaiveDate>,
        pub patch: EntryPatch,
    }

    /// Per-kind field patches. `None` preserves the stored value. For
    /// double-optional fields, `Some(None)` clears the stored value.
    #[derive(Debug, Clone)]
    pub enum EntryPatch {
        Milk {
            received: Option<bool>,
            quantity: Option<f64>,
            rate: Option<f64>,
        },
        Petrol {
            rate: Option<f64>,
            total: Option<f64>,
            meter_reading: Option<Option<String>>,
        },
        Service {
            expense: Option<f64>,
            note: Option<String>,
        },
        Water {
            received: Option<bool>,
        },
        Todo {
            task: Option<String>,
            due_date: Option<Option<NaiveDate>>,
            priority: Option<Priority>,
            completed: Option<bool>,
        },
        Expense {
            item: Option<String>,
            amount: Option<f64>,
            category: Option<String>,
        },
        Custom {
            note: Option<String>,
        },
    }

    /// Input for deleting an entry. Confirmation is the caller's concern.
    #[derive(Debug, Clone)]
    pub struct DeleteEntryCommand {
        pub tab_id: String,
        pub entry_id: String,
    }

    /// Input for marking or unmarking a day in a daily-grid tab. The
    /// service routes this to a create when the day has no persisted
    /// record and to an in-place update when it does.
    #[derive(Debug, Clone)]
    pub struct MarkDayCommand {
        pub tab_id: String,
        pub date: NaiveDate,
        pub marked: bool,
    }
}
