//! JSON-file storage backend.

use std::path::{Path, PathBuf};

use crate::storage::traits::Connection;

use super::tab_repository::TabRepository;

/// Connection for the JSON-file backend. Holds the directory the store
/// file lives in; repositories derive their file paths from it.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    pub fn new(base_directory: impl AsRef<Path>) -> Self {
        Self {
            base_directory: base_directory.as_ref().to_path_buf(),
        }
    }

    /// Default store location under the user's home directory.
    pub fn new_default() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        Self::new(
            PathBuf::from(home)
                .join("Documents")
                .join("Personal Tracker"),
        )
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }
}

impl Connection for JsonConnection {
    type TabRepository = TabRepository;

    fn create_tab_repository(&self) -> Self::TabRepository {
        TabRepository::new(&self.base_directory)
    }
}
