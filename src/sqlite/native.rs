use rusqlite::Connection;

use crate::base::NativeHandle;
use crate::dsn::Dsn;
use crate::error::{Error, NativeError, Result, TransactionOp};
use crate::options::ConnectionOptions;
use crate::types::Driver;

impl NativeHandle for Connection {
    const DRIVER: Driver = Driver::Sqlite;

    fn open_native(
        dsn: &Dsn,
        _user: Option<&str>,
        _password: Option<&str>,
        options: &ConnectionOptions,
    ) -> Result<Self> {
        let path = dsn
            .path()
            .ok_or_else(|| Error::connection_failed(Driver::Sqlite, "connection string has no path"))?;
        let busy_timeout = options.timeout(Driver::Sqlite)?;

        let conn = Connection::open(path)
            .map_err(|e| Error::native_connection_failed(NativeError::from(e)))?;
        if let Some(timeout) = busy_timeout {
            conn.busy_timeout(timeout)
                .map_err(|e| Error::native_connection_failed(NativeError::from(e)))?;
        }
        Ok(conn)
    }

    fn transaction_statement(&mut self, op: TransactionOp) -> Result<(), NativeError> {
        let sql = match op {
            TransactionOp::Begin => "BEGIN",
            TransactionOp::Commit => "COMMIT",
            TransactionOp::Rollback => "ROLLBACK",
        };
        self.execute_batch(sql).map_err(NativeError::from)
    }

    fn native_server_version(&mut self) -> Result<String, NativeError> {
        self.query_row("SELECT sqlite_version()", [], |row| row.get(0))
            .map_err(NativeError::from)
    }

    fn native_in_transaction(&self) -> Option<bool> {
        Some(!self.is_autocommit())
    }
}
