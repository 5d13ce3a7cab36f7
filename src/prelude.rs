//! Convenient imports for common functionality.

pub use crate::any::{AnyConnection, AnyHandle};
pub use crate::config::ConnectionConfig;
pub use crate::connection::DatabaseConnection;
pub use crate::dsn::{Dsn, SQLITE_MEMORY};
pub use crate::error::{Error, NativeError, Result, TransactionOp};
pub use crate::factory::Factory;
pub use crate::mysql::MysqlConfig;
pub use crate::options::ConnectionOptions;
pub use crate::pgsql::PgsqlConfig;
pub use crate::sqlite::SqliteConfig;
pub use crate::types::Driver;

#[cfg(feature = "mysql")]
pub use crate::mysql::MysqlConnection;
#[cfg(feature = "postgres")]
pub use crate::pgsql::PgsqlConnection;
#[cfg(feature = "sqlite")]
pub use crate::sqlite::SqliteConnection;
