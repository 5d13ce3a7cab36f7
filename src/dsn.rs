//! Driver-specific connection strings.
//!
//! Server engines use `<driver>:key=value;key=value`, `SQLite` uses
//! `sqlite:<path>`. The native openers read their target back out of the
//! parsed form, so a [`Dsn`] is the one place a connection's target lives.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::types::Driver;

/// Path `SQLite` treats as a private in-memory database.
pub const SQLITE_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Params(Vec<(String, String)>),
    Path(String),
}

/// The typed constructors do not escape values, so a host or database name
/// holding `;` or `=` renders a string that does not parse back to the same
/// parameters. [`crate::ConnectionConfig::from_mapping`] rejects such values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dsn {
    driver: Driver,
    target: Target,
}

impl Dsn {
    #[must_use]
    pub fn mysql(host: &str, port: u16, database: &str, charset: &str) -> Self {
        Self::with_params(
            Driver::Mysql,
            [
                ("host", host.to_owned()),
                ("port", port.to_string()),
                ("dbname", database.to_owned()),
                ("charset", charset.to_owned()),
            ],
        )
    }

    #[must_use]
    pub fn pgsql(host: &str, port: u16, database: &str) -> Self {
        Self::with_params(
            Driver::Pgsql,
            [
                ("host", host.to_owned()),
                ("port", port.to_string()),
                ("dbname", database.to_owned()),
            ],
        )
    }

    #[must_use]
    pub fn sqlite(path: &str) -> Self {
        Self {
            driver: Driver::Sqlite,
            target: Target::Path(path.to_owned()),
        }
    }

    fn with_params<const N: usize>(driver: Driver, params: [(&str, String); N]) -> Self {
        Self {
            driver,
            target: Target::Params(
                params
                    .into_iter()
                    .map(|(key, value)| (key.to_owned(), value))
                    .collect(),
            ),
        }
    }

    #[must_use]
    pub fn driver(&self) -> Driver {
        self.driver
    }

    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        match &self.target {
            Target::Params(params) => params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, value)| value.as_str()),
            Target::Path(_) => None,
        }
    }

    /// The file path of a `SQLite` DSN.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match &self.target {
            Target::Path(path) => Some(path.as_str()),
            Target::Params(_) => None,
        }
    }

    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.path() == Some(SQLITE_MEMORY)
    }

    #[cfg(any(feature = "mysql", feature = "postgres"))]
    pub(crate) fn require(&self, key: &str) -> Result<&str> {
        self.param(key).ok_or_else(|| {
            Error::connection_failed(self.driver, format!("connection string has no `{key}`"))
        })
    }

    #[cfg(any(feature = "mysql", feature = "postgres"))]
    pub(crate) fn require_port(&self) -> Result<u16> {
        let port = self.require("port")?;
        port.parse().map_err(|_| {
            Error::connection_failed(self.driver, format!("invalid port `{port}` in connection string"))
        })
    }
}

impl fmt::Display for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.driver)?;
        match &self.target {
            Target::Path(path) => f.write_str(path),
            Target::Params(params) => {
                for (idx, (key, value)) in params.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(";")?;
                    }
                    write!(f, "{key}={value}")?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for Dsn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (prefix, rest) = s.split_once(':').ok_or_else(|| {
            Error::InvalidConfiguration(format!("connection string `{s}` has no driver prefix"))
        })?;
        let driver: Driver = prefix.parse()?;
        if driver == Driver::Sqlite {
            if rest.is_empty() {
                return Err(Error::InvalidConfiguration(
                    "sqlite connection string has no path".into(),
                ));
            }
            return Ok(Self::sqlite(rest));
        }

        let params = rest
            .split(';')
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.split_once('=')
                    .map(|(key, value)| (key.trim().to_owned(), value.trim().to_owned()))
                    .ok_or_else(|| {
                        Error::InvalidConfiguration(format!(
                            "connection string parameter `{part}` is not key=value"
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            driver,
            target: Target::Params(params),
        })
    }
}
