//! The connection type handed out by the factory.

use crate::connection::DatabaseConnection;
use crate::error::Result;
use crate::types::Driver;

#[cfg(feature = "mysql")]
use crate::mysql::MysqlConnection;
#[cfg(feature = "postgres")]
use crate::pgsql::PgsqlConnection;
#[cfg(feature = "sqlite")]
use crate::sqlite::SqliteConnection;

/// A connection to any of the supported engines.
#[derive(Debug)]
pub enum AnyConnection {
    #[cfg(feature = "mysql")]
    Mysql(MysqlConnection),
    #[cfg(feature = "postgres")]
    Pgsql(PgsqlConnection),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteConnection),
}

/// Borrowed native handle of an [`AnyConnection`].
///
/// Match on it to run queries with the engine's own API:
/// ```rust
/// use serde_json::json;
/// use sql_connector::prelude::*;
///
/// let mut conn = Factory::create("sqlite", &json!({ "path": ":memory:" }))?;
/// if let AnyHandle::Sqlite(db) = conn.handle()? {
///     db.execute_batch("CREATE TABLE t (id INTEGER);")?;
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub enum AnyHandle<'a> {
    #[cfg(feature = "mysql")]
    Mysql(&'a mut ::mysql::Conn),
    #[cfg(feature = "postgres")]
    Pgsql(&'a mut ::postgres::Client),
    #[cfg(feature = "sqlite")]
    Sqlite(&'a mut rusqlite::Connection),
}

// Native handles do not all implement `Debug`
impl std::fmt::Debug for AnyHandle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "mysql")]
            Self::Mysql(_) => f.debug_tuple("Mysql").field(&"<Conn>").finish(),
            #[cfg(feature = "postgres")]
            Self::Pgsql(_) => f.debug_tuple("Pgsql").field(&"<Client>").finish(),
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => f.debug_tuple("Sqlite").field(&"<Connection>").finish(),
        }
    }
}

macro_rules! dispatch {
    ($self:expr, $conn:ident => $body:expr) => {
        match $self {
            #[cfg(feature = "mysql")]
            AnyConnection::Mysql($conn) => $body,
            #[cfg(feature = "postgres")]
            AnyConnection::Pgsql($conn) => $body,
            #[cfg(feature = "sqlite")]
            AnyConnection::Sqlite($conn) => $body,
        }
    };
}

impl AnyConnection {
    #[cfg(feature = "mysql")]
    #[must_use]
    pub fn as_mysql(&self) -> Option<&MysqlConnection> {
        match self {
            AnyConnection::Mysql(conn) => Some(conn),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    #[cfg(feature = "mysql")]
    pub fn as_mysql_mut(&mut self) -> Option<&mut MysqlConnection> {
        match self {
            AnyConnection::Mysql(conn) => Some(conn),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    #[cfg(feature = "postgres")]
    #[must_use]
    pub fn as_pgsql(&self) -> Option<&PgsqlConnection> {
        match self {
            AnyConnection::Pgsql(conn) => Some(conn),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    #[cfg(feature = "postgres")]
    pub fn as_pgsql_mut(&mut self) -> Option<&mut PgsqlConnection> {
        match self {
            AnyConnection::Pgsql(conn) => Some(conn),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    #[cfg(feature = "sqlite")]
    #[must_use]
    pub fn as_sqlite(&self) -> Option<&SqliteConnection> {
        match self {
            AnyConnection::Sqlite(conn) => Some(conn),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    /// The `SQLite` connection, for `database_path()` and `vacuum()`.
    #[cfg(feature = "sqlite")]
    pub fn as_sqlite_mut(&mut self) -> Option<&mut SqliteConnection> {
        match self {
            AnyConnection::Sqlite(conn) => Some(conn),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    /// # Errors
    /// Gives the connection back unchanged if it is not `SQLite`.
    #[cfg(feature = "sqlite")]
    pub fn into_sqlite(self) -> Result<SqliteConnection, Self> {
        match self {
            AnyConnection::Sqlite(conn) => Ok(conn),
            #[allow(unreachable_patterns)]
            other => Err(other),
        }
    }

    /// # Errors
    /// Gives the connection back unchanged if it is not `MySQL`.
    #[cfg(feature = "mysql")]
    pub fn into_mysql(self) -> Result<MysqlConnection, Self> {
        match self {
            AnyConnection::Mysql(conn) => Ok(conn),
            #[allow(unreachable_patterns)]
            other => Err(other),
        }
    }

    /// # Errors
    /// Gives the connection back unchanged if it is not `PostgreSQL`.
    #[cfg(feature = "postgres")]
    pub fn into_pgsql(self) -> Result<PgsqlConnection, Self> {
        match self {
            AnyConnection::Pgsql(conn) => Ok(conn),
            #[allow(unreachable_patterns)]
            other => Err(other),
        }
    }

    /// Merged connection options.
    #[must_use]
    pub fn options(&self) -> &crate::options::ConnectionOptions {
        dispatch!(self, conn => conn.options())
    }

    /// The connection string this connection was opened with.
    #[must_use]
    pub fn dsn(&self) -> crate::dsn::Dsn {
        dispatch!(self, conn => conn.dsn())
    }
}

impl DatabaseConnection for AnyConnection {
    type Handle<'a> = AnyHandle<'a>;

    fn handle(&mut self) -> Result<Self::Handle<'_>> {
        Ok(match self {
            #[cfg(feature = "mysql")]
            AnyConnection::Mysql(conn) => AnyHandle::Mysql(conn.handle()?),
            #[cfg(feature = "postgres")]
            AnyConnection::Pgsql(conn) => AnyHandle::Pgsql(conn.handle()?),
            #[cfg(feature = "sqlite")]
            AnyConnection::Sqlite(conn) => AnyHandle::Sqlite(conn.handle()?),
        })
    }

    fn is_connected(&self) -> bool {
        dispatch!(self, conn => conn.is_connected())
    }

    fn disconnect(&mut self) {
        dispatch!(self, conn => conn.disconnect());
    }

    fn reconnect(&mut self) -> Result<()> {
        dispatch!(self, conn => conn.reconnect())
    }

    fn begin_transaction(&mut self) -> Result<()> {
        dispatch!(self, conn => conn.begin_transaction())
    }

    fn commit(&mut self) -> Result<()> {
        dispatch!(self, conn => conn.commit())
    }

    fn rollback(&mut self) -> Result<()> {
        dispatch!(self, conn => conn.rollback())
    }

    fn in_transaction(&self) -> Result<bool> {
        dispatch!(self, conn => conn.in_transaction())
    }

    fn database_name(&self) -> Result<&str> {
        dispatch!(self, conn => conn.database_name())
    }

    fn driver(&self) -> Driver {
        dispatch!(self, conn => conn.driver())
    }

    fn server_version(&mut self) -> Result<String> {
        dispatch!(self, conn => conn.server_version())
    }
}

#[cfg(feature = "mysql")]
impl From<MysqlConnection> for AnyConnection {
    fn from(conn: MysqlConnection) -> Self {
        AnyConnection::Mysql(conn)
    }
}

#[cfg(feature = "postgres")]
impl From<PgsqlConnection> for AnyConnection {
    fn from(conn: PgsqlConnection) -> Self {
        AnyConnection::Pgsql(conn)
    }
}

#[cfg(feature = "sqlite")]
impl From<SqliteConnection> for AnyConnection {
    fn from(conn: SqliteConnection) -> Self {
        AnyConnection::Sqlite(conn)
    }
}
