//! Storage layer: traits the domain depends on plus the JSON backend.

pub mod json;
pub mod traits;

pub use json::JsonConnection;
pub use traits::{Connection, TabStorage, TrackerSnapshot};
