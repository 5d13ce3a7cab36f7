use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dsn::Dsn;
use crate::options::ConnectionOptions;

pub const DEFAULT_PORT: u16 = 5432;

/// Options for connecting to a `PostgreSQL` server.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct PgsqlConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    #[serde(default)]
    pub options: ConnectionOptions,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl PgsqlConfig {
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            database: database.into(),
            user: user.into(),
            password: password.into(),
            options: ConnectionOptions::new(),
        }
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ConnectionOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn dsn(&self) -> Dsn {
        Dsn::pgsql(&self.host, self.port, &self.database)
    }
}

impl fmt::Debug for PgsqlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgsqlConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dsn_uses_default_port() {
        let cfg = PgsqlConfig::new("pg", "analytics", "report", "pw");
        assert_eq!(cfg.dsn().to_string(), "pgsql:host=pg;port=5432;dbname=analytics");
        assert_eq!(cfg.with_port(6432).dsn().param("port"), Some("6432"));
    }

    #[test]
    fn debug_hides_password() {
        let rendered = format!("{:?}", PgsqlConfig::new("pg", "db", "u", "s3cr3t"));
        assert!(!rendered.contains("s3cr3t"));
    }
}
