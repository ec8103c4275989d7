//! Personal tracker backend.
//!
//! A small record-keeping engine organized around named tabs, each a
//! typed collection of dated entries. The domain layer owns the
//! lifecycle, the calendar reconciliation and the export projection;
//! the storage layer keeps the whole collection in a single JSON file.
//! Everything is synchronous; one operation runs at a time.

pub mod domain;
pub mod storage;

use std::path::Path;

use log::info;

use domain::{CalendarService, DomainResult, ExportService, TabService};
use storage::JsonConnection;

/// The assembled backend: every service over one storage connection.
#[derive(Clone)]
pub struct AppState {
    pub tab_service: TabService<JsonConnection>,
    pub calendar_service: CalendarService,
    pub export_service: ExportService,
}

/// Wire up the backend against a data directory.
pub fn initialize_backend(data_directory: &Path) -> DomainResult<AppState> {
    info!("Starting tracker backend with data in {:?}", data_directory);
    let connection = JsonConnection::new(data_directory);
    Ok(AppState {
        tab_service: TabService::new(&connection)?,
        calendar_service: CalendarService::new(),
        export_service: ExportService::new(),
    })
}

/// Wire up the backend against the default store location under the
/// user's home directory.
pub fn initialize_default_backend() -> DomainResult<AppState> {
    let connection = JsonConnection::new_default();
    info!(
        "Starting tracker backend with data in {:?}",
        connection.base_directory()
    );
    Ok(AppState {
        tab_service: TabService::new(&connection)?,
        calendar_service: CalendarService::new(),
        export_service: ExportService::new(),
    })
}
