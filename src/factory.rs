use serde_json::Value;
use tracing::debug;

use crate::any::AnyConnection;
use crate::config::ConnectionConfig;
use crate::error::{Error, Result};
use crate::types::Driver;

/// Builds connections from a driver tag and a loose configuration mapping.
///
/// ```rust
/// use serde_json::json;
/// use sql_connector::prelude::*;
///
/// let conn = Factory::create("sqlite", &json!({ "path": ":memory:" }))?;
/// assert!(conn.is_connected());
/// assert_eq!(conn.driver_name(), "sqlite");
/// # Ok::<(), sql_connector::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Factory;

impl Factory {
    /// Validates `config` for `driver` and opens the connection.
    ///
    /// # Errors
    /// Returns `Error::InvalidConfiguration` for an unsupported driver or a
    /// missing/invalid field (nothing is opened in that case), otherwise
    /// whatever opening the connection returns, typically `Error::ConnectionFailed`.
    pub fn create(driver: &str, config: &Value) -> Result<AnyConnection> {
        let config = ConnectionConfig::from_mapping(driver, config)?;
        Self::connect(config)
    }

    /// Opens a connection from an already typed configuration.
    ///
    /// # Errors
    /// Returns `Error::InvalidConfiguration` if the driver is not compiled
    /// into this build, otherwise whatever opening the connection returns.
    pub fn connect(config: ConnectionConfig) -> Result<AnyConnection> {
        let driver = config.driver();
        if !driver.is_enabled() {
            return Err(Error::InvalidConfiguration(format!(
                "driver `{driver}` is not enabled in this build"
            )));
        }
        debug!(%driver, "creating connection");

        match config {
            #[cfg(feature = "mysql")]
            ConnectionConfig::Mysql(cfg) => {
                crate::mysql::MysqlConnection::connect(cfg).map(AnyConnection::from)
            }
            #[cfg(feature = "postgres")]
            ConnectionConfig::Pgsql(cfg) => {
                crate::pgsql::PgsqlConnection::connect(cfg).map(AnyConnection::from)
            }
            #[cfg(feature = "sqlite")]
            ConnectionConfig::Sqlite(cfg) => {
                crate::sqlite::SqliteConnection::connect(cfg).map(AnyConnection::from)
            }
            #[allow(unreachable_patterns)]
            _ => Err(Error::InvalidConfiguration(format!(
                "driver `{driver}` is not enabled in this build"
            ))),
        }
    }

    /// `mysql`, `pgsql`, `sqlite`, always in this order.
    #[must_use]
    pub fn supported_drivers() -> [&'static str; 3] {
        Driver::ALL.map(Driver::as_str)
    }

    #[must_use]
    pub fn supports_driver(driver: &str) -> bool {
        Self::supported_drivers()
            .iter()
            .any(|supported| *supported == driver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_drivers_are_stable() {
        assert_eq!(Factory::supported_drivers(), ["mysql", "pgsql", "sqlite"]);
    }

    #[test]
    fn supports_driver_is_membership() {
        assert!(Factory::supports_driver("mysql"));
        assert!(Factory::supports_driver("pgsql"));
        assert!(Factory::supports_driver("sqlite"));
        assert!(!Factory::supports_driver("postgres"));
        assert!(!Factory::supports_driver("oracle"));
        assert!(!Factory::supports_driver(""));
    }
}
