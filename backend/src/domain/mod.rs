//! Domain layer: models, services and the error taxonomy.

pub mod calendar;
pub mod commands;
pub mod errors;
pub mod export_service;
pub mod mappers;
pub mod models;
pub mod reconcile;
pub mod settings;
pub mod tab_service;

pub use calendar::CalendarService;
pub use errors::{DomainError, DomainResult};
pub use export_service::ExportService;
pub use tab_service::TabService;
