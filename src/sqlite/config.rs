use serde::{Deserialize, Serialize};

use crate::dsn::{Dsn, SQLITE_MEMORY};
use crate::options::ConnectionOptions;

/// Options for opening a `SQLite` database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqliteConfig {
    /// File path, or [`SQLITE_MEMORY`] for a private in-memory database.
    pub path: String,
    #[serde(default)]
    pub options: ConnectionOptions,
}

impl SqliteConfig {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            options: ConnectionOptions::new(),
        }
    }

    #[must_use]
    pub fn memory() -> Self {
        Self::new(SQLITE_MEMORY)
    }

    #[must_use]
    pub fn with_options(mut self, options: ConnectionOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.path == SQLITE_MEMORY
    }

    #[must_use]
    pub fn dsn(&self) -> Dsn {
        Dsn::sqlite(&self.path)
    }
}
