// MySQL module - connections backed by the blocking mysql client
//
// - config: connection configuration and charset rules
// - native: mysql::Conn glue for the shared base
// - connection: the connection type

pub mod config;
#[cfg(feature = "mysql")]
pub mod connection;
#[cfg(feature = "mysql")]
mod native;

pub use config::MysqlConfig;
#[cfg(feature = "mysql")]
pub use connection::MysqlConnection;
