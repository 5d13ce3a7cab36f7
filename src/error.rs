use std::fmt;

use thiserror::Error;

use crate::types::Driver;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The transaction statement that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionOp {
    Begin,
    Commit,
    Rollback,
}

impl fmt::Display for TransactionOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionOp::Begin => "begin",
            TransactionOp::Commit => "commit",
            TransactionOp::Rollback => "rollback",
        })
    }
}

/// A failure reported by one of the native drivers.
///
/// Keeps the driver's message and, when the engine provides one, its error
/// code (`SQLite` extended result code, `PostgreSQL` SQLSTATE, `MySQL` error
/// number), without exposing the driver's own error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeError {
    driver: Driver,
    message: String,
    code: Option<String>,
}

impl NativeError {
    pub fn new(driver: Driver, message: impl Into<String>) -> Self {
        Self {
            driver,
            message: message.into(),
            code: None,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn driver(&self) -> Driver {
        self.driver
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} [{code}]", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for NativeError {}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for NativeError {
    fn from(err: rusqlite::Error) -> Self {
        let native = NativeError::new(Driver::Sqlite, err.to_string());
        match &err {
            rusqlite::Error::SqliteFailure(failure, _) => {
                native.with_code(failure.extended_code.to_string())
            }
            _ => native,
        }
    }
}

#[cfg(feature = "postgres")]
impl From<::postgres::Error> for NativeError {
    fn from(err: ::postgres::Error) -> Self {
        let message = match err.as_db_error() {
            Some(db) => db.message().to_owned(),
            None => err.to_string(),
        };
        let native = NativeError::new(Driver::Pgsql, message);
        match err.code() {
            Some(state) => native.with_code(state.code()),
            None => native,
        }
    }
}

#[cfg(feature = "mysql")]
impl From<::mysql::Error> for NativeError {
    fn from(err: ::mysql::Error) -> Self {
        match &err {
            ::mysql::Error::MySqlError(server) => {
                NativeError::new(Driver::Mysql, server.message.clone())
                    .with_code(server.code.to_string())
            }
            _ => NativeError::new(Driver::Mysql, err.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("could not connect to {driver} database: {reason}")]
    ConnectionFailed {
        driver: Driver,
        reason: String,
        #[source]
        source: Option<NativeError>,
    },

    #[error("not connected to {0} database")]
    NotConnected(Driver),

    #[error("database name not available: {0} connection is closed")]
    NotAvailable(Driver),

    #[error("could not {operation} transaction on {driver} database: {reason}")]
    TransactionFailed {
        driver: Driver,
        operation: TransactionOp,
        reason: String,
        #[source]
        source: Option<NativeError>,
    },

    #[error("could not reconnect to {driver} database")]
    ReconnectFailed {
        driver: Driver,
        #[source]
        source: Box<Error>,
    },

    #[error("{driver} statement `{statement}` failed")]
    StatementFailed {
        driver: Driver,
        statement: &'static str,
        #[source]
        source: NativeError,
    },
}

impl Error {
    pub(crate) fn connection_failed(driver: Driver, reason: impl Into<String>) -> Self {
        Error::ConnectionFailed {
            driver,
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn native_connection_failed(native: NativeError) -> Self {
        Error::ConnectionFailed {
            driver: native.driver(),
            reason: native.message().to_owned(),
            source: Some(native),
        }
    }

    pub(crate) fn transaction_failed(
        driver: Driver,
        operation: TransactionOp,
        reason: impl Into<String>,
    ) -> Self {
        Error::TransactionFailed {
            driver,
            operation,
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn native_transaction_failed(operation: TransactionOp, native: NativeError) -> Self {
        Error::TransactionFailed {
            driver: native.driver(),
            operation,
            reason: native.message().to_owned(),
            source: Some(native),
        }
    }

    /// The driver the failure concerns, when there is one.
    #[must_use]
    pub fn driver(&self) -> Option<Driver> {
        match self {
            Error::InvalidConfiguration(_) => None,
            Error::ConnectionFailed { driver, .. }
            | Error::TransactionFailed { driver, .. }
            | Error::ReconnectFailed { driver, .. }
            | Error::StatementFailed { driver, .. }
            | Error::NotConnected(driver)
            | Error::NotAvailable(driver) => Some(*driver),
        }
    }

    /// The native driver failure behind this error, if any.
    #[must_use]
    pub fn native(&self) -> Option<&NativeError> {
        match self {
            Error::ConnectionFailed { source, .. } | Error::TransactionFailed { source, .. } => {
                source.as_ref()
            }
            Error::StatementFailed { source, .. } => Some(source),
            Error::ReconnectFailed { source, .. } => source.native(),
            _ => None,
        }
    }

    /// True for `NotConnected` and `NotAvailable`, the two closed-handle errors.
    #[must_use]
    pub fn is_not_connected(&self) -> bool {
        matches!(self, Error::NotConnected(_) | Error::NotAvailable(_))
    }

    #[must_use]
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Error::InvalidConfiguration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn connection_failed_names_driver() {
        let err = Error::connection_failed(Driver::Sqlite, "directory `/nope` does not exist");
        assert_eq!(
            err.to_string(),
            "could not connect to sqlite database: directory `/nope` does not exist"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn native_cause_is_chained() {
        let native = NativeError::new(Driver::Pgsql, "password authentication failed")
            .with_code("28P01");
        let err = Error::native_connection_failed(native.clone());
        assert_eq!(err.native(), Some(&native));
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("password authentication failed [28P01]")
        );
    }

    #[test]
    fn reconnect_failed_exposes_inner_native_cause() {
        let native = NativeError::new(Driver::Mysql, "Unknown database 'gone'").with_code("1049");
        let err = Error::ReconnectFailed {
            driver: Driver::Mysql,
            source: Box::new(Error::native_connection_failed(native)),
        };
        assert_eq!(err.to_string(), "could not reconnect to mysql database");
        assert_eq!(err.native().and_then(NativeError::code), Some("1049"));
        assert_eq!(err.driver(), Some(Driver::Mysql));
    }

    #[test]
    fn transaction_failure_names_operation() {
        let err = Error::transaction_failed(Driver::Sqlite, TransactionOp::Rollback, "no active transaction");
        assert_eq!(
            err.to_string(),
            "could not rollback transaction on sqlite database: no active transaction"
        );
    }

    #[test]
    fn closed_handle_predicate() {
        assert!(Error::NotConnected(Driver::Pgsql).is_not_connected());
        assert!(Error::NotAvailable(Driver::Pgsql).is_not_connected());
        assert!(!Error::InvalidConfiguration("missing host".into()).is_not_connected());
    }
}
