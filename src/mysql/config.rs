use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dsn::Dsn;
use crate::options::ConnectionOptions;

pub const DEFAULT_PORT: u16 = 3306;
pub const DEFAULT_CHARSET: &str = "utf8mb4";

/// Options for connecting to a `MySQL` or `MariaDB` server.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct MysqlConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    #[serde(default = "default_charset")]
    pub charset: String,
    #[serde(default)]
    pub options: ConnectionOptions,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_charset() -> String {
    DEFAULT_CHARSET.to_owned()
}

impl MysqlConfig {
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
            charset: default_charset(),
            options: ConnectionOptions::new(),
        }
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ConnectionOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn dsn(&self) -> Dsn {
        Dsn::mysql(&self.host, self.port, &self.database, &self.charset)
    }
}

impl fmt::Debug for MysqlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MysqlConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("charset", &self.charset)
            .field("options", &self.options)
            .finish()
    }
}

/// Charset names end up in `SET NAMES`, so only identifier characters are allowed.
#[must_use]
pub fn is_valid_charset(charset: &str) -> bool {
    !charset.is_empty()
        && charset
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = MysqlConfig::new("db", "shop", "app", "secret");
        assert_eq!(cfg.port, 3306);
        assert_eq!(cfg.charset, "utf8mb4");
        assert_eq!(
            cfg.dsn().to_string(),
            "mysql:host=db;port=3306;dbname=shop;charset=utf8mb4"
        );
    }

    #[test]
    fn debug_hides_password() {
        let rendered = format!("{:?}", MysqlConfig::new("db", "shop", "app", "hunter2"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn deserialize_fills_defaults() {
        let cfg: MysqlConfig = serde_json::from_value(serde_json::json!({
            "host": "db", "database": "shop", "user": "app", "password": ""
        }))
        .unwrap();
        assert_eq!(cfg, MysqlConfig::new("db", "shop", "app", ""));
    }

    #[test]
    fn charset_rules() {
        assert!(is_valid_charset("utf8mb4"));
        assert!(is_valid_charset("latin1"));
        assert!(!is_valid_charset(""));
        assert!(!is_valid_charset("utf8; DROP TABLE x"));
    }
}
