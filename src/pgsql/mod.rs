// PostgreSQL module - connections backed by the blocking postgres client
//
// - config: connection configuration
// - native: postgres::Client glue for the shared base
// - connection: the connection type

pub mod config;
#[cfg(feature = "postgres")]
pub mod connection;
#[cfg(feature = "postgres")]
mod native;

pub use config::PgsqlConfig;
#[cfg(feature = "postgres")]
pub use connection::PgsqlConnection;
