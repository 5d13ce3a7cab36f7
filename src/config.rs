//! Typed connection configuration, and the loose mapping form the factory accepts.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::mysql::config::{DEFAULT_CHARSET, MysqlConfig, is_valid_charset};
use crate::options::ConnectionOptions;
use crate::pgsql::config::PgsqlConfig;
use crate::sqlite::config::SqliteConfig;
use crate::types::Driver;

/// Configuration for one connection, tagged by driver.
///
/// ```rust
/// use serde_json::json;
/// use sql_connector::prelude::*;
///
/// let cfg = ConnectionConfig::from_mapping(
///     "mysql",
///     &json!({ "host": "db", "user": "app", "password": "pw", "database": "shop" }),
/// )?;
/// let ConnectionConfig::Mysql(mysql) = cfg else { unreachable!() };
/// assert_eq!(mysql.port, 3306);
/// # Ok::<(), sql_connector::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "driver", rename_all = "lowercase")]
pub enum ConnectionConfig {
    Mysql(MysqlConfig),
    Pgsql(PgsqlConfig),
    Sqlite(SqliteConfig),
}

impl ConnectionConfig {
    #[must_use]
    pub fn driver(&self) -> Driver {
        match self {
            ConnectionConfig::Mysql(_) => Driver::Mysql,
            ConnectionConfig::Pgsql(_) => Driver::Pgsql,
            ConnectionConfig::Sqlite(_) => Driver::Sqlite,
        }
    }

    #[must_use]
    pub fn options(&self) -> &ConnectionOptions {
        match self {
            ConnectionConfig::Mysql(cfg) => &cfg.options,
            ConnectionConfig::Pgsql(cfg) => &cfg.options,
            ConnectionConfig::Sqlite(cfg) => &cfg.options,
        }
    }

    /// Validates a loosely typed mapping and fills in per-driver defaults.
    ///
    /// Server engines need `host`, `user`, `password` and `database`, checked
    /// in that order; `SQLite` needs `path`.
    ///
    /// # Errors
    /// Returns `Error::InvalidConfiguration` naming the unsupported driver, the
    /// first missing field, or the field with an unusable value.
    pub fn from_mapping(driver: &str, config: &Value) -> Result<Self> {
        let driver: Driver = driver.parse()?;
        let map = config.as_object().ok_or_else(|| {
            Error::InvalidConfiguration(format!("{driver} configuration must be a mapping"))
        })?;

        Ok(match driver {
            Driver::Mysql => {
                let Server {
                    host,
                    user,
                    password,
                    database,
                } = Server::extract(map)?;
                let charset = optional_string(map, "charset")?
                    .unwrap_or_else(|| DEFAULT_CHARSET.to_owned());
                if !is_valid_charset(&charset) {
                    return Err(Error::InvalidConfiguration(format!(
                        "invalid charset `{charset}`"
                    )));
                }
                ConnectionConfig::Mysql(
                    MysqlConfig::new(host, database, user, password)
                        .with_port(port(map, crate::mysql::config::DEFAULT_PORT)?)
                        .with_charset(charset)
                        .with_options(options(map)?),
                )
            }
            Driver::Pgsql => {
                let Server {
                    host,
                    user,
                    password,
                    database,
                } = Server::extract(map)?;
                ConnectionConfig::Pgsql(
                    PgsqlConfig::new(host, database, user, password)
                        .with_port(port(map, crate::pgsql::config::DEFAULT_PORT)?)
                        .with_options(options(map)?),
                )
            }
            Driver::Sqlite => ConnectionConfig::Sqlite(
                SqliteConfig::new(required(map, "path")?).with_options(options(map)?),
            ),
        })
    }
}

struct Server {
    host: String,
    user: String,
    password: String,
    database: String,
}

impl Server {
    fn extract(map: &Map<String, Value>) -> Result<Self> {
        let host = required(map, "host")?;
        let user = required(map, "user")?;
        // an empty password is a valid credential
        let password = optional_string(map, "password")?.ok_or_else(|| missing("password"))?;
        let database = required(map, "database")?;
        Ok(Self {
            host: dsn_safe("host", host)?,
            user,
            password,
            database: dsn_safe("database", database)?,
        })
    }
}

/// Values rendered into a `key=value;` connection string.
fn dsn_safe(key: &str, value: String) -> Result<String> {
    if value.contains([';', '=']) {
        return Err(Error::InvalidConfiguration(format!(
            "field `{key}` must not contain `;` or `=`"
        )));
    }
    Ok(value)
}

fn missing(key: &str) -> Error {
    Error::InvalidConfiguration(format!("missing {key}"))
}

/// Present, non-null and non-empty.
fn required(map: &Map<String, Value>, key: &str) -> Result<String> {
    match optional_string(map, key)? {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(missing(key)),
    }
}

fn optional_string(map: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(Value::Number(value)) => Ok(Some(value.to_string())),
        Some(other) => Err(Error::InvalidConfiguration(format!(
            "field `{key}` must be a string, got {other}"
        ))),
    }
}

fn port(map: &Map<String, Value>, default: u16) -> Result<u16> {
    let invalid = |value: &Value| {
        Error::InvalidConfiguration(format!("field `port` must be a port number, got {value}"))
    };
    match map.get("port") {
        None | Some(Value::Null) => Ok(default),
        Some(value @ Value::Number(number)) => number
            .as_u64()
            .and_then(|n| u16::try_from(n).ok())
            .filter(|n| *n != 0)
            .ok_or_else(|| invalid(value)),
        Some(value @ Value::String(text)) => text
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|n| *n != 0)
            .ok_or_else(|| invalid(value)),
        Some(other) => Err(invalid(other)),
    }
}

fn options(map: &Map<String, Value>) -> Result<ConnectionOptions> {
    match map.get("options") {
        None | Some(Value::Null) => Ok(ConnectionOptions::new()),
        Some(Value::Object(options)) => Ok(ConnectionOptions::from(options.clone())),
        Some(other) => Err(Error::InvalidConfiguration(format!(
            "field `options` must be a mapping, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn server_fields() -> Value {
        json!({ "host": "db", "user": "app", "password": "pw", "database": "shop" })
    }

    fn message(err: Error) -> String {
        match err {
            Error::InvalidConfiguration(message) => message,
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn mysql_defaults() {
        let ConnectionConfig::Mysql(cfg) =
            ConnectionConfig::from_mapping("mysql", &server_fields()).unwrap()
        else {
            panic!("expected mysql config");
        };
        assert_eq!(cfg.port, 3306);
        assert_eq!(cfg.charset, "utf8mb4");
        assert!(cfg.options.is_empty());
    }

    #[test]
    fn pgsql_defaults() {
        let cfg = ConnectionConfig::from_mapping("pgsql", &server_fields()).unwrap();
        assert_eq!(cfg.driver(), Driver::Pgsql);
        let ConnectionConfig::Pgsql(cfg) = cfg else {
            panic!("expected pgsql config");
        };
        assert_eq!(cfg.port, 5432);
    }

    #[test]
    fn missing_fields_are_reported_in_order() {
        let cases = [
            (json!({ "user": "u", "password": "p", "database": "d" }), "missing host"),
            (json!({ "host": "h", "password": "p", "database": "d" }), "missing user"),
            (json!({ "host": "h", "user": "u", "database": "d" }), "missing password"),
            (json!({ "host": "h", "user": "u", "password": "p" }), "missing database"),
            (json!({}), "missing host"),
            (json!({ "database": "d" }), "missing host"),
            (json!({ "host": "h" }), "missing user"),
        ];
        for driver in ["mysql", "pgsql"] {
            for (config, expected) in &cases {
                let err = ConnectionConfig::from_mapping(driver, config).unwrap_err();
                assert_eq!(message(err), *expected, "{driver} {config}");
            }
        }
    }

    #[test]
    fn empty_and_null_required_fields_count_as_missing() {
        let config = json!({ "host": "", "user": "u", "password": "p", "database": "d" });
        assert_eq!(
            message(ConnectionConfig::from_mapping("mysql", &config).unwrap_err()),
            "missing host"
        );
        let config = json!({ "host": "h", "user": "u", "password": "p", "database": null });
        assert_eq!(
            message(ConnectionConfig::from_mapping("pgsql", &config).unwrap_err()),
            "missing database"
        );
    }

    #[test]
    fn empty_password_is_accepted() {
        let config = json!({ "host": "h", "user": "root", "password": "", "database": "d" });
        assert!(ConnectionConfig::from_mapping("mysql", &config).is_ok());
    }

    #[test]
    fn sqlite_requires_path() {
        let err = ConnectionConfig::from_mapping("sqlite", &json!({})).unwrap_err();
        assert_eq!(message(err), "missing path");
        let cfg = ConnectionConfig::from_mapping("sqlite", &json!({ "path": ":memory:" })).unwrap();
        assert_eq!(cfg, ConnectionConfig::Sqlite(SqliteConfig::memory()));
    }

    #[test]
    fn unsupported_driver_is_named() {
        let err = ConnectionConfig::from_mapping("oracle", &json!({})).unwrap_err();
        assert!(message(err).contains("oracle"));
    }

    #[test]
    fn port_accepts_numbers_and_numeric_strings() {
        let mut config = server_fields();
        config["port"] = json!("3307");
        let ConnectionConfig::Mysql(cfg) = ConnectionConfig::from_mapping("mysql", &config).unwrap()
        else {
            panic!("expected mysql config");
        };
        assert_eq!(cfg.port, 3307);

        for bad in [json!(0), json!(70000), json!("http"), json!(true), json!(-1)] {
            config["port"] = bad;
            let err = ConnectionConfig::from_mapping("mysql", &config).unwrap_err();
            assert!(message(err).contains("port"));
        }
    }

    #[test]
    fn options_must_be_a_mapping() {
        let mut config = server_fields();
        config["options"] = json!({ "timeout": 2 });
        let cfg = ConnectionConfig::from_mapping("pgsql", &config).unwrap();
        assert_eq!(cfg.options().get("timeout"), Some(&json!(2)));

        config["options"] = json!(["timeout"]);
        let err = ConnectionConfig::from_mapping("pgsql", &config).unwrap_err();
        assert!(message(err).contains("options"));
    }

    #[test]
    fn charset_is_validated() {
        let mut config = server_fields();
        config["charset"] = json!("latin1");
        assert!(ConnectionConfig::from_mapping("mysql", &config).is_ok());
        config["charset"] = json!("utf8'; --");
        assert!(ConnectionConfig::from_mapping("mysql", &config).is_err());
    }

    #[test]
    fn connection_string_separators_are_rejected() {
        for (key, value) in [("host", "db;port=1"), ("database", "shop=x"), ("database", "a;b")] {
            let mut config = server_fields();
            config[key] = json!(value);
            for driver in ["mysql", "pgsql"] {
                let err = ConnectionConfig::from_mapping(driver, &config).unwrap_err();
                assert!(message(err).contains(key), "{driver} {key}={value}");
            }
        }
        // only values that land in the connection string are restricted
        let mut config = server_fields();
        config["password"] = json!("p=w;d");
        assert!(ConnectionConfig::from_mapping("pgsql", &config).is_ok());
    }

    #[test]
    fn configuration_must_be_a_mapping() {
        let err = ConnectionConfig::from_mapping("sqlite", &json!("app.db")).unwrap_err();
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn tagged_deserialization() {
        let cfg: ConnectionConfig =
            serde_json::from_value(json!({ "driver": "sqlite", "path": "app.db" })).unwrap();
        assert_eq!(cfg, ConnectionConfig::Sqlite(SqliteConfig::new("app.db")));
    }
}
