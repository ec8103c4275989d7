//! Capability interface for daily-grid ("reconciled") tab types.
//!
//! The calendar engine never switches on the tab type. Each category
//! whose display model is one row per calendar day implements a policy
//! describing how to synthesize a placeholder for an unrecorded day, how
//! to build the persisted entry when a placeholder day is marked, and
//! how to read the marked flag and derived figures for aggregation.
//! Adding a new reconciled category means adding a policy here, nothing
//! in the engine changes.

use crate::domain::models::entry::EntryKind;
use crate::domain::models::tab::{TabSettings, TabType};
use crate::domain::settings::{DEFAULT_MILK_QUANTITY, DEFAULT_MILK_RATE};

pub trait ReconcilePolicy: Sync {
    /// A non-persisted row for a day with no stored record: unmarked,
    /// zeroed derived fields, rate pre-filled from the tab's current
    /// settings so a subsequent "mark" starts from a sensible value.
    fn placeholder(&self, settings: &TabSettings) -> EntryKind;

    /// The persisted payload created when the user marks a placeholder
    /// day, seeded from the tab's current defaults.
    fn marked_entry(&self, settings: &TabSettings) -> EntryKind;

    /// Flip the marked flag on an existing payload in place, zeroing
    /// derived values when unmarking. Unmarking never deletes the
    /// record; the day's entry continues to exist. Marking a payload
    /// whose quantity was zeroed by an earlier unmark reseeds it from
    /// the tab's defaults so the day contributes to the month again.
    fn set_marked(&self, kind: &mut EntryKind, marked: bool, settings: &TabSettings);

    /// Whether this payload counts as a marked day.
    fn is_marked(&self, kind: &EntryKind) -> bool;

    /// Monetary contribution of this payload to the month total.
    fn amount(&self, kind: &EntryKind) -> f64;

    /// Unit-quantity contribution of this payload to the month total.
    fn quantity(&self, kind: &EntryKind) -> f64;
}

/// Look up the reconcile policy for a tab type. `None` means the type
/// is not a daily-grid category.
pub fn policy_for(tab_type: TabType) -> Option<&'static dyn ReconcilePolicy> {
    match tab_type {
        TabType::Milk => Some(&MilkPolicy),
        TabType::Water => Some(&WaterPolicy),
        _ => None,
    }
}

struct MilkPolicy;

impl MilkPolicy {
    fn rate(settings: &TabSettings) -> f64 {
        settings.default_rate.unwrap_or(DEFAULT_MILK_RATE)
    }

    fn daily_quantity(settings: &TabSettings) -> f64 {
        settings.default_quantity.unwrap_or(DEFAULT_MILK_QUANTITY)
    }
}

impl ReconcilePolicy for MilkPolicy {
    fn placeholder(&self, settings: &TabSettings) -> EntryKind {
        EntryKind::Milk {
            received: false,
            quantity: 0.0,
            rate: Self::rate(settings),
            total: 0.0,
        }
    }

    fn marked_entry(&self, settings: &TabSettings) -> EntryKind {
        let mut kind = EntryKind::Milk {
            received: true,
            quantity: Self::daily_quantity(settings),
            rate: Self::rate(settings),
            total: 0.0,
        };
        kind.recompute_derived();
        kind
    }

    fn set_marked(&self, kind: &mut EntryKind, marked: bool, settings: &TabSettings) {
        if let EntryKind::Milk {
            received, quantity, ..
        } = kind
        {
            *received = marked;
            if marked && *quantity == 0.0 {
                *quantity = Self::daily_quantity(settings);
            }
            kind.recompute_derived();
        }
    }

    fn is_marked(&self, kind: &EntryKind) -> bool {
        matches!(kind, EntryKind::Milk { received: true, .. })
    }

    fn amount(&self, kind: &EntryKind) -> f64 {
        match kind {
            EntryKind::Milk { total, .. } => *total,
            _ => 0.0,
        }
    }

    fn quantity(&self, kind: &EntryKind) -> f64 {
        match kind {
            EntryKind::Milk {
                received: true,
                quantity,
                ..
            } => *quantity,
            _ => 0.0,
        }
    }
}

struct WaterPolicy;

impl ReconcilePolicy for WaterPolicy {
    fn placeholder(&self, _settings: &TabSettings) -> EntryKind {
        EntryKind::Water { received: false }
    }

    fn marked_entry(&self, _settings: &TabSettings) -> EntryKind {
        EntryKind::Water { received: true }
    }

    fn set_marked(&self, kind: &mut EntryKind, marked: bool, _settings: &TabSettings) {
        if let EntryKind::Water { received } = kind {
            *received = marked;
        }
    }

    fn is_marked(&self, kind: &EntryKind) -> bool {
        matches!(kind, EntryKind::Water { received: true })
    }

    fn amount(&self, _kind: &EntryKind) -> f64 {
        0.0
    }

    fn quantity(&self, _kind: &EntryKind) -> f64 {
        0.0
    }
}
