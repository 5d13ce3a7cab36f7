//! Uniform, blocking connections to `MySQL`/`MariaDB`, `PostgreSQL` and `SQLite`.
//!
//! Connections are thin wrappers over the native drivers (`mysql`,
//! `postgres`, `rusqlite`): this crate assembles the connection string,
//! applies default options, translates driver errors into [`Error`] and
//! passes transaction control through. Queries go straight to the native
//! handle returned by [`DatabaseConnection::handle`].
//!
//! ```rust
//! use serde_json::json;
//! use sql_connector::prelude::*;
//!
//! let mut conn = Factory::create("sqlite", &json!({ "path": ":memory:" }))?;
//! conn.begin_transaction()?;
//! if let AnyHandle::Sqlite(db) = conn.handle()? {
//!     db.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY);")?;
//! }
//! conn.commit()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#[cfg(not(any(feature = "mysql", feature = "postgres", feature = "sqlite")))]
compile_error!("enable at least one of the `mysql`, `postgres` or `sqlite` features");

mod macros;

pub mod any;
mod base;
pub mod config;
pub mod connection;
pub mod dsn;
pub mod error;
pub mod factory;
pub mod mysql;
pub mod options;
pub mod pgsql;
pub mod prelude;
pub mod sqlite;
pub mod types;

pub use any::{AnyConnection, AnyHandle};
pub use config::ConnectionConfig;
pub use connection::DatabaseConnection;
pub use dsn::Dsn;
pub use error::{Error, NativeError, Result, TransactionOp};
pub use factory::Factory;
pub use options::ConnectionOptions;
pub use types::Driver;
