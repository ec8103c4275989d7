//! Calendar reconciliation engine.
//!
//! For daily-grid tab types the display model is not the entry list but
//! one row per calendar day of the focused month. Reconciliation joins
//! the month's day sequence against the tab's persisted entries by
//! date, synthesizing an unmarked placeholder for every day without a
//! record, and recomputes the month aggregates from scratch. Nothing
//! here mutates the tab; marking a day goes through the lifecycle
//! service.

use std::sync::{Arc, Mutex};

use chrono::{Datelike, Local, NaiveDate};
use log::debug;
use shared::{CalendarFocusDate, DayRow, ExpenseMonthSummary, MonthOption, MonthSummary, MonthView};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::mappers::EntryMapper;
use crate::domain::models::entry::EntryKind;
use crate::domain::models::tab::{Tab, TabType};
use crate::domain::reconcile::policy_for;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// How far back and forward the month picker reaches from today.
const MONTHS_BACK: i32 = 12;
const MONTHS_FORWARD: i32 = 6;

#[derive(Clone)]
pub struct CalendarService {
    focus_date: Arc<Mutex<CalendarFocusDate>>,
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarService {
    pub fn new() -> Self {
        Self {
            focus_date: Arc::new(Mutex::new(CalendarFocusDate::default())),
        }
    }

    /// Build the month view for a daily-grid tab: exactly one row per
    /// calendar day, in ascending date order, with placeholders for
    /// days that have no persisted record.
    pub fn reconcile_month(&self, tab: &Tab, month: u32, year: u32) -> DomainResult<MonthView> {
        validate_month(month)?;
        let policy = policy_for(tab.tab_type).ok_or_else(|| {
            DomainError::Validation(format!(
                "tab type '{}' has no daily grid",
                tab.tab_type
            ))
        })?;

        let mut rows = Vec::new();
        let mut summary = MonthSummary {
            total_amount: 0.0,
            days_marked: 0,
            total_quantity: 0.0,
        };
        for day in 1..=Self::days_in_month(month, year) {
            let date = NaiveDate::from_ymd_opt(year as i32, month, day)
                .ok_or_else(|| DomainError::Validation(format!("invalid date {year}-{month}-{day}")))?;
            let (entry_id, persisted, kind) = match tab.entry_for_date(date) {
                Some(entry) => (Some(entry.id.clone()), true, entry.kind.clone()),
                None => (None, false, policy.placeholder(&tab.settings)),
            };
            if policy.is_marked(&kind) {
                summary.days_marked += 1;
                summary.total_amount += policy.amount(&kind);
                summary.total_quantity += policy.quantity(&kind);
            }
            rows.push(DayRow {
                date: date.format("%Y-%m-%d").to_string(),
                entry_id,
                persisted,
                kind: EntryMapper::kind_to_dto(&kind),
            });
        }

        debug!(
            "🗓️ CALENDAR: reconciled {}/{} for tab {} ({} days, {} marked)",
            month,
            year,
            tab.id,
            rows.len(),
            summary.days_marked
        );
        Ok(MonthView {
            month,
            year,
            rows,
            summary,
        })
    }

    /// Monthly statistics for an expense tab: totals, average, and the
    /// per-category breakdown ordered by descending total. Ties keep
    /// first-encounter order.
    pub fn expense_month_summary(
        &self,
        tab: &Tab,
        month: u32,
        year: u32,
    ) -> DomainResult<ExpenseMonthSummary> {
        validate_month(month)?;
        if tab.tab_type != TabType::Expense {
            return Err(DomainError::Validation(format!(
                "tab type '{}' has no expense summary",
                tab.tab_type
            )));
        }

        let mut total_amount = 0.0;
        let mut entry_count = 0;
        let mut categories: Vec<shared::CategorySummary> = Vec::new();
        for entry in &tab.entries {
            if entry.date.month() != month || entry.date.year() != year as i32 {
                continue;
            }
            if let EntryKind::Expense {
                amount, category, ..
            } = &entry.kind
            {
                total_amount += amount;
                entry_count += 1;
                match categories.iter_mut().find(|c| &c.category == category) {
                    Some(summary) => {
                        summary.total += amount;
                        summary.count += 1;
                    }
                    None => categories.push(shared::CategorySummary {
                        category: category.clone(),
                        total: *amount,
                        count: 1,
                    }),
                }
            }
        }
        categories.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(std::cmp::Ordering::Equal));

        let average_per_entry = if entry_count > 0 {
            total_amount / entry_count as f64
        } else {
            0.0
        };
        let top_categories = categories.iter().take(3).cloned().collect();
        Ok(ExpenseMonthSummary {
            month,
            year,
            total_amount,
            entry_count,
            average_per_entry,
            categories,
            top_categories,
        })
    }

    pub fn focus_date(&self) -> CalendarFocusDate {
        *self.focus_date.lock().unwrap()
    }

    pub fn set_focus(&self, month: u32, year: u32) -> DomainResult<CalendarFocusDate> {
        validate_month(month)?;
        let mut focus = self.focus_date.lock().unwrap();
        *focus = CalendarFocusDate { month, year };
        debug!("🗓️ CALENDAR: focus moved to {}/{}", month, year);
        Ok(*focus)
    }

    pub fn focus_previous_month(&self) -> CalendarFocusDate {
        let mut focus = self.focus_date.lock().unwrap();
        let (month, year) = Self::previous_month(focus.month, focus.year);
        *focus = CalendarFocusDate { month, year };
        *focus
    }

    pub fn focus_next_month(&self) -> CalendarFocusDate {
        let mut focus = self.focus_date.lock().unwrap();
        let (month, year) = Self::next_month(focus.month, focus.year);
        *focus = CalendarFocusDate { month, year };
        *focus
    }

    /// The selectable months around today, oldest first.
    pub fn month_options(&self) -> Vec<MonthOption> {
        let now = Local::now();
        let mut options = Vec::new();
        for offset in -MONTHS_BACK..=MONTHS_FORWARD {
            let total = now.year() * 12 + now.month() as i32 - 1 + offset;
            let year = total.div_euclid(12);
            let month = (total.rem_euclid(12) + 1) as u32;
            options.push(MonthOption {
                value: format!("{year:04}-{month:02}"),
                label: format!("{} {}", Self::month_name(month), year),
            });
        }
        options
    }

    pub fn days_in_month(month: u32, year: u32) -> u32 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 => {
                if Self::is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
            _ => 0,
        }
    }

    pub fn is_leap_year(year: u32) -> bool {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }

    pub fn month_name(month: u32) -> &'static str {
        MONTH_NAMES
            .get(month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("")
    }

    pub fn previous_month(month: u32, year: u32) -> (u32, u32) {
        if month == 1 {
            (12, year - 1)
        } else {
            (month - 1, year)
        }
    }

    pub fn next_month(month: u32, year: u32) -> (u32, u32) {
        if month == 12 {
            (1, year + 1)
        } else {
            (month + 1, year)
        }
    }
}

fn validate_month(month: u32) -> DomainResult<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(DomainError::Validation(format!("invalid month {month}")))
    }
}
