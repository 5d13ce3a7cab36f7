use ::postgres::Client;

use crate::base::ConnectionBase;
use crate::dsn::Dsn;
use crate::error::Result;
use crate::macros::impl_database_connection;
use crate::options::ConnectionOptions;
use crate::types::Driver;

use super::config::PgsqlConfig;

/// A `PostgreSQL` session opened through the blocking `postgres` client.
pub struct PgsqlConnection {
    config: PgsqlConfig,
    base: ConnectionBase<Client>,
}

impl PgsqlConnection {
    /// Opens a session without TLS.
    ///
    /// # Errors
    /// Returns `Error::ConnectionFailed` if the server cannot be reached or rejects the login.
    pub fn connect(config: PgsqlConfig) -> Result<Self> {
        let base = Self::establish(&config)?;
        Ok(Self { config, base })
    }

    fn establish(config: &PgsqlConfig) -> Result<ConnectionBase<Client>> {
        ConnectionBase::connect(
            &config.dsn(),
            Some(&config.user),
            Some(&config.password),
            &config.options,
            &config.database,
        )
    }

    #[must_use]
    pub fn config(&self) -> &PgsqlConfig {
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

impl_database_connection!(PgsqlConnection, Client, Driver::Pgsql);

impl std::fmt::Debug for PgsqlConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgsqlConnection")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("database", &self.config.database)
            .field("connected", &self.base.is_connected())
            .finish()
    }
}
