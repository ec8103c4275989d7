//! Default-settings resolution for tab categories.
//!
//! Defaults are applied exactly once, at the boundary: the resolver
//! seeds a tab's settings at creation, and reads that need a value not
//! present in the stored settings fall back to the category default
//! here rather than scattering fallbacks across call sites.

use crate::domain::models::tab::{TabSettings, TabType};

/// Default per-litre milk rate seeded on milk tabs.
pub const DEFAULT_MILK_RATE: f64 = 60.0;
/// Default per-litre petrol rate seeded on petrol tabs.
pub const DEFAULT_PETROL_RATE: f64 = 100.0;
/// Fallback daily milk quantity when a milk tab has none configured.
pub const DEFAULT_MILK_QUANTITY: f64 = 3.0;

/// Initial configuration for a freshly created tab. Called exactly once
/// at creation; later changes go through the tab update path.
pub fn default_settings_for(tab_type: TabType) -> TabSettings {
    match tab_type {
        TabType::Milk => TabSettings {
            default_rate: Some(DEFAULT_MILK_RATE),
            ..Default::default()
        },
        TabType::Petrol => TabSettings {
            default_rate: Some(DEFAULT_PETROL_RATE),
            ..Default::default()
        },
        _ => TabSettings::default(),
    }
}

/// Built-in expense categories used when a tab has none configured.
pub fn default_expense_categories() -> Vec<String> {
    [
        "Food & Dining",
        "Transportation",
        "Shopping",
        "Entertainment",
        "Bills & Utilities",
        "Health & Fitness",
        "Education",
        "Other",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// The category list an expense tab accepts: configured list if present,
/// otherwise the built-in defaults.
pub fn allowed_categories(settings: &TabSettings) -> Vec<String> {
    settings
        .categories
        .clone()
        .unwrap_or_else(default_expense_categories)
}

/// Shallow-merge a settings patch into the stored settings: a `Some`
/// field replaces the stored field, a `None` field preserves it.
pub fn merge_settings(current: &mut TabSettings, patch: &TabSettings) {
    if let Some(rate) = patch.default_rate {
        current.default_rate = Some(rate);
    }
    if let Some(quantity) = patch.default_quantity {
        current.default_quantity = Some(quantity);
    }
    if let Some(categories) = &patch.categories {
        current.categories = Some(categories.clone());
    }
}
