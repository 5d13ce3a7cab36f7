use std::fs;
use std::io;
use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::base::ConnectionBase;
use crate::dsn::Dsn;
use crate::error::{Error, NativeError, Result};
use crate::macros::impl_database_connection;
use crate::options::ConnectionOptions;
use crate::types::Driver;

use super::config::SqliteConfig;

/// Applied to every freshly opened handle, in this order.
pub const PRAGMAS: [&str; 5] = [
    "PRAGMA foreign_keys = ON",
    "PRAGMA journal_mode = WAL",
    "PRAGMA synchronous = NORMAL",
    "PRAGMA temp_store = MEMORY",
    "PRAGMA mmap_size = 268435456",
];

/// A `SQLite` database opened through `rusqlite`.
///
/// ```rust
/// use sql_connector::prelude::*;
///
/// let mut conn = SqliteConnection::connect(SqliteConfig::memory())?;
/// conn.handle()?.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY);")?;
/// assert_eq!(conn.driver_name(), "sqlite");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct SqliteConnection {
    config: SqliteConfig,
    base: ConnectionBase<Connection>,
}

impl SqliteConnection {
    /// Checks the target path, opens the database and applies [`PRAGMAS`].
    ///
    /// # Errors
    /// Returns `Error::ConnectionFailed` if the path cannot host a database,
    /// the file cannot be opened, or the pragmas are rejected.
    pub fn connect(config: SqliteConfig) -> Result<Self> {
        let base = Self::establish(&config)?;
        Ok(Self { config, base })
    }

    fn establish(config: &SqliteConfig) -> Result<ConnectionBase<Connection>> {
        check_path(&config.path)?;
        let mut base =
            ConnectionBase::connect(&config.dsn(), None, None, &config.options, &config.path)?;
        apply_pragmas(base.handle()?)
            .map_err(|e| Error::native_connection_failed(NativeError::from(e)))?;
        debug!(path = %config.path, "sqlite pragmas applied");
        Ok(base)
    }

    #[must_use]
    pub fn config(&self) -> &SqliteConfig {
        &self.config
    }

    #[must_use]
    pub fn dsn(&self) -> Dsn {
        self.config.dsn()
    }

    /// Merged connection options.
    #[must_use]
    pub fn options(&self) -> &ConnectionOptions {
        self.base.options()
    }

    /// The configured path; available whether or not the connection is open.
    #[must_use]
    pub fn database_path(&self) -> &str {
        &self.config.path
    }

    /// Rebuilds the database file to reclaim free pages.
    ///
    /// # Errors
    /// Returns `Error::NotConnected` when closed, or `Error::StatementFailed` if `VACUUM` fails
    /// (for example inside an open transaction).
    pub fn vacuum(&mut self) -> Result<()> {
        self.base
            .handle()?
            .execute_batch("VACUUM")
            .map_err(|e| Error::StatementFailed {
                driver: Driver::Sqlite,
                statement: "VACUUM",
                source: NativeError::from(e),
            })
    }
}

/// Some pragmas answer with the new value, so each one is stepped to completion.
fn apply_pragmas(conn: &Connection) -> rusqlite::Result<()> {
    for pragma in PRAGMAS {
        let mut stmt = conn.prepare(pragma)?;
        let mut rows = stmt.query([])?;
        while rows.next()?.is_some() {}
    }
    Ok(())
}

/// Rejects targets `SQLite` could not create or read, before touching the driver.
fn check_path(path: &str) -> Result<()> {
    if path == crate::dsn::SQLITE_MEMORY {
        return Ok(());
    }
    if path.is_empty() {
        return Err(Error::connection_failed(Driver::Sqlite, "database path is empty"));
    }

    let target = Path::new(path);
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let meta = fs::metadata(dir).map_err(|e| {
        let reason = match e.kind() {
            io::ErrorKind::NotFound => format!("directory `{}` does not exist", dir.display()),
            io::ErrorKind::PermissionDenied => {
                format!("directory `{}` is not accessible", dir.display())
            }
            _ => format!("directory `{}` cannot be inspected: {e}", dir.display()),
        };
        Error::connection_failed(Driver::Sqlite, reason)
    })?;
    if !meta.is_dir() {
        return Err(Error::connection_failed(
            Driver::Sqlite,
            format!("`{}` is not a directory", dir.display()),
        ));
    }
    // the journal and WAL files are created next to the database
    tempfile::tempfile_in(dir).map_err(|_| {
        Error::connection_failed(
            Driver::Sqlite,
            format!("directory `{}` is not writable", dir.display()),
        )
    })?;
    if target.exists() {
        fs::File::open(target).map_err(|_| {
            Error::connection_failed(
                Driver::Sqlite,
                format!("database file `{path}` is not readable"),
            )
        })?;
    }
    Ok(())
}

impl_database_connection!(SqliteConnection, Connection, Driver::Sqlite);

impl std::fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("path", &self.config.path)
            .field("connected", &self.base.is_connected())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_target_skips_path_checks() {
        assert!(check_path(":memory:").is_ok());
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(matches!(
            check_path(""),
            Err(Error::ConnectionFailed { driver: Driver::Sqlite, .. })
        ));
    }

    #[test]
    fn missing_directory_is_rejected() {
        let err = check_path("/definitely/not/a/real/dir/app.db").unwrap_err();
        assert!(err.to_string().starts_with("could not connect to sqlite database"));
        assert!(err.native().is_none());
    }

    #[test]
    fn file_as_parent_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, b"x").unwrap();
        let nested = file.join("app.db");
        assert!(check_path(nested.to_str().unwrap()).is_err());
    }

    /// Root ignores permission bits, so these checks only mean something for other users.
    #[cfg(unix)]
    fn permissions_enforced(dir: &Path) -> bool {
        fs::File::create(dir.join(".write-check")).is_err()
    }

    #[cfg(unix)]
    #[test]
    fn read_only_directory_is_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();
        if permissions_enforced(&locked) {
            let err = check_path(locked.join("app.db").to_str().unwrap()).unwrap_err();
            assert!(matches!(err, Error::ConnectionFailed { driver: Driver::Sqlite, .. }));
            assert!(err.native().is_none());
            assert!(err.to_string().contains("not writable"));

            let err = SqliteConnection::connect(SqliteConfig::new(
                locked.join("app.db").to_string_lossy(),
            ))
            .unwrap_err();
            assert!(err.native().is_none());
        }
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app.db");
        fs::write(&file, b"").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::File::open(&file).is_err() {
            let err = check_path(file.to_str().unwrap()).unwrap_err();
            assert!(matches!(err, Error::ConnectionFailed { driver: Driver::Sqlite, .. }));
            assert!(err.native().is_none());
            assert!(err.to_string().contains("not readable"));
        }
    }

    #[test]
    fn bare_file_name_uses_current_directory() {
        assert!(check_path("relative-sqlite-connector-check.db").is_ok());
    }
}
