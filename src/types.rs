use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The database engines a connection can target.
///
/// The tag is what the factory dispatches on and what every connection
/// reports back through `driver_name()`:
/// ```rust
/// use sql_connector::prelude::*;
///
/// let driver: Driver = "pgsql".parse().unwrap();
/// assert_eq!(driver, Driver::Pgsql);
/// assert_eq!(driver.default_port(), Some(5432));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    /// `MySQL` or `MariaDB`
    Mysql,
    /// `PostgreSQL`
    Pgsql,
    /// `SQLite`
    Sqlite,
}

impl Driver {
    /// Every driver tag, in the order the factory reports them.
    pub const ALL: [Driver; 3] = [Driver::Mysql, Driver::Pgsql, Driver::Sqlite];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Driver::Mysql => "mysql",
            Driver::Pgsql => "pgsql",
            Driver::Sqlite => "sqlite",
        }
    }

    /// Default TCP port for server engines; `SQLite` has none.
    #[must_use]
    pub fn default_port(self) -> Option<u16> {
        match self {
            Driver::Mysql => Some(3306),
            Driver::Pgsql => Some(5432),
            Driver::Sqlite => None,
        }
    }

    /// Whether the native driver for this engine was compiled into this build.
    #[must_use]
    pub fn is_enabled(self) -> bool {
        match self {
            Driver::Mysql => cfg!(feature = "mysql"),
            Driver::Pgsql => cfg!(feature = "postgres"),
            Driver::Sqlite => cfg!(feature = "sqlite"),
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Driver {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Driver::ALL
            .into_iter()
            .find(|driver| driver.as_str() == s)
            .ok_or_else(|| Error::InvalidConfiguration(format!("unsupported driver `{s}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tags() {
        for driver in Driver::ALL {
            assert_eq!(driver.as_str().parse::<Driver>().unwrap(), driver);
        }
    }

    #[test]
    fn rejects_unknown_tag() {
        let err = "oracle".parse::<Driver>().unwrap_err();
        assert!(err.is_invalid_configuration());
        assert!(err.to_string().contains("oracle"));
    }

    #[test]
    fn tags_are_case_sensitive() {
        assert!("MySQL".parse::<Driver>().is_err());
    }
}
