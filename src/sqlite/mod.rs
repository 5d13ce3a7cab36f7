// SQLite module - connections backed by rusqlite
//
// - config: connection configuration
// - native: rusqlite handle glue for the shared base
// - connection: the connection type, path checks and pragmas

pub mod config;
#[cfg(feature = "sqlite")]
pub mod connection;
#[cfg(feature = "sqlite")]
mod native;

pub use config::SqliteConfig;
#[cfg(feature = "sqlite")]
pub use connection::SqliteConnection;
