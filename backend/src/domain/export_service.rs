//! Export projector.
//!
//! Projects the full tab collection into a multi-section tabular
//! document, one section per tab with category-specific columns, and
//! renders that document to CSV. The projection is pure; only
//! `export_to_path` touches the filesystem.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Local, NaiveDate};
use log::info;
use shared::{ExportDocument, ExportSection, ExportToPathResult};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::entry::{Entry, EntryKind, Priority};
use crate::domain::models::tab::{Tab, TabType};

const EXPORT_TITLE: &str = "Personal Tracker";
/// Human date format used throughout the document, e.g. "02 Mar 2024".
const DATE_FORMAT: &str = "%d %b %Y";
/// Marker row for a tab with no entries.
const NO_ENTRIES: &str = "No entries";

#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Project every tab into a document section. Exporting an empty
    /// collection is an error; a tab without entries gets a marker row.
    pub fn export_document(&self, tabs: &[Tab]) -> DomainResult<ExportDocument> {
        if tabs.is_empty() {
            return Err(DomainError::Validation(
                "there are no tabs to export".to_string(),
            ));
        }

        let sections = tabs.iter().map(build_section).collect::<Vec<_>>();
        info!("📄 EXPORT: projected {} tabs into a document", sections.len());
        Ok(ExportDocument {
            title: EXPORT_TITLE.to_string(),
            generated_on: Local::now().format(DATE_FORMAT).to_string(),
            sections,
        })
    }

    /// Render a document as CSV text. Sections are separated by a blank
    /// record; rows may be ragged so the writer runs in flexible mode.
    pub fn render_csv(&self, document: &ExportDocument) -> DomainResult<String> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        write_record(&mut writer, &[document.title.clone()])?;
        write_record(&mut writer, &[format!("Generated on {}", document.generated_on)])?;
        for section in &document.sections {
            write_record(&mut writer, &[String::new()])?;
            write_record(&mut writer, &[section.title.clone()])?;
            write_record(&mut writer, &section.headers)?;
            for row in &section.rows {
                write_record(&mut writer, row)?;
            }
        }

        let bytes = writer
            .into_inner()
            .context("Failed to flush export writer")
            .map_err(DomainError::Persistence)?;
        String::from_utf8(bytes)
            .context("Export produced invalid UTF-8")
            .map_err(DomainError::Persistence)
    }

    /// Project, render and write the export into the given directory.
    /// The filename is date-stamped, `personal-tracker-YYYY-MM-DD.csv`.
    pub fn export_to_path(
        &self,
        tabs: &[Tab],
        directory: &Path,
    ) -> DomainResult<ExportToPathResult> {
        let document = self.export_document(tabs)?;
        let csv = self.render_csv(&document)?;

        let file_name = format!("personal-tracker-{}.csv", Local::now().format("%Y-%m-%d"));
        let file_path: PathBuf = directory.join(file_name);
        std::fs::create_dir_all(directory)
            .with_context(|| format!("Failed to create export directory {directory:?}"))?;
        std::fs::write(&file_path, csv)
            .with_context(|| format!("Failed to write export file {file_path:?}"))?;

        info!("📄 EXPORT: wrote {:?}", file_path);
        Ok(ExportToPathResult {
            file_path: file_path.to_string_lossy().into_owned(),
            section_count: document.sections.len(),
        })
    }
}

fn write_record<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    record: &[String],
) -> DomainResult<()> {
    writer
        .write_record(record)
        .context("Failed to write export record")
        .map_err(DomainError::Persistence)
}

fn build_section(tab: &Tab) -> ExportSection {
    let headers = headers_for(tab.tab_type);
    let rows = if tab.entries.is_empty() {
        vec![vec![NO_ENTRIES.to_string()]]
    } else {
        tab.entries.iter().map(entry_row).collect()
    };
    ExportSection {
        title: format!("{} ({})", tab.name, tab.tab_type),
        headers,
        rows,
    }
}

fn headers_for(tab_type: TabType) -> Vec<String> {
    let headers: &[&str] = match tab_type {
        TabType::Milk => &["Date", "Received", "Quantity (L)", "Rate (₹)", "Total (₹)"],
        TabType::Petrol => &[
            "Date",
            "Rate (₹)",
            "Total (₹)",
            "Quantity (L)",
            "Meter Reading",
        ],
        TabType::Service => &["Date", "Expense (₹)", "Note"],
        TabType::Water => &["Date", "Received"],
        TabType::Todo => &["Task", "Priority", "Due Date", "Status"],
        TabType::Expense => &["Date", "Item", "Amount (₹)", "Category"],
        TabType::Custom => &["Date", "Note"],
    };
    headers.iter().map(|h| h.to_string()).collect()
}

fn entry_row(entry: &Entry) -> Vec<String> {
    let date = format_date(entry.date);
    match &entry.kind {
        EntryKind::Milk {
            received,
            quantity,
            rate,
            total,
        } => vec![
            date,
            yes_no(*received),
            format!("{quantity:.2}"),
            format!("{rate:.2}"),
            format!("{total:.2}"),
        ],
        EntryKind::Petrol {
            rate,
            total,
            quantity,
            meter_reading,
        } => vec![
            date,
            format!("{rate:.2}"),
            format!("{total:.2}"),
            format!("{quantity:.2}"),
            meter_reading.clone().unwrap_or_else(|| "-".to_string()),
        ],
        EntryKind::Service { expense, note } => {
            vec![date, format!("{expense:.2}"), note.clone()]
        }
        EntryKind::Water { received } => vec![date, yes_no(*received)],
        EntryKind::Todo {
            task,
            due_date,
            priority,
            completed,
        } => vec![
            task.clone(),
            priority_label(*priority),
            due_date.map(format_date).unwrap_or_else(|| "-".to_string()),
            if *completed { "Completed" } else { "Pending" }.to_string(),
        ],
        EntryKind::Expense {
            item,
            amount,
            category,
        } => vec![
            date,
            item.clone(),
            format!("{amount:.2}"),
            category.clone(),
        ],
        EntryKind::Custom { note } => vec![date, note.clone()],
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn yes_no(value: bool) -> String {
    if value { "Yes" } else { "No" }.to_string()
}

fn priority_label(priority: Priority) -> String {
    match priority {
        Priority::Low => "LOW",
        Priority::Medium => "MEDIUM",
        Priority::High => "HIGH",
    }
    .to_string()
}
