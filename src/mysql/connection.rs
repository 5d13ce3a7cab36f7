use ::mysql::Conn;

use crate::base::ConnectionBase;
use crate::dsn::Dsn;
use crate::error::Result;
use crate::macros::impl_database_connection;
use crate::options::ConnectionOptions;
use crate::types::Driver;

use super::config::MysqlConfig;

/// A `MySQL`/`MariaDB` session opened through the blocking `mysql` client.
pub struct MysqlConnection {
    config: MysqlConfig,
    base: ConnectionBase<Conn>,
}

impl MysqlConnection {
    /// Opens a session and sets the configured charset.
    ///
    /// # Errors
    /// Returns `Error::ConnectionFailed` if the server cannot be reached or rejects the login.
    pub fn connect(config: MysqlConfig) -> Result<Self> {
        let base = Self::establish(&config)?;
        Ok(Self { config, base })
    }

    fn establish(config: &MysqlConfig) -> Result<ConnectionBase<Conn>> {
        ConnectionBase::connect(
            &config.dsn(),
            Some(&config.user),
            Some(&config.password),
            &config.options,
            &config.database,
        )
    }

    #[must_use]
    pub fn config(&self) -> &MysqlConfig {
        &self.config
    }

    #[must_use]
    pub fn dsn(&self) -> Dsn {
        self.config.dsn()
    }

    #[must_use]
    pub fn options(&self) -> &ConnectionOptions {
        self.base.options()
    }
}

impl_database_connection!(MysqlConnection, Conn, Driver::Mysql);

impl std::fmt::Debug for MysqlConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MysqlConnection")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("database", &self.config.database)
            .field("connected", &self.base.is_connected())
            .finish()
    }
}
