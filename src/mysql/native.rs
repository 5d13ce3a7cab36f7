use ::mysql::prelude::Queryable;
use ::mysql::{Conn, OptsBuilder};

use crate::base::NativeHandle;
use crate::dsn::Dsn;
use crate::error::{Error, NativeError, Result, TransactionOp};
use crate::options::ConnectionOptions;
use crate::types::Driver;

use super::config::{DEFAULT_CHARSET, is_valid_charset};

impl NativeHandle for Conn {
    const DRIVER: Driver = Driver::Mysql;

    fn open_native(
        dsn: &Dsn,
        user: Option<&str>,
        password: Option<&str>,
        options: &ConnectionOptions,
    ) -> Result<Self> {
        let host = dsn.require("host")?;
        let port = dsn.require_port()?;
        let database = dsn.require("dbname")?;
        let charset = dsn.param("charset").unwrap_or(DEFAULT_CHARSET);
        if !is_valid_charset(charset) {
            return Err(Error::connection_failed(
                Driver::Mysql,
                format!("invalid charset `{charset}`"),
            ));
        }
        let connect_timeout = options.timeout(Driver::Mysql)?;

        let opts = OptsBuilder::new()
            .ip_or_hostname(Some(host))
            .tcp_port(port)
            .db_name(Some(database))
            .user(user)
            .pass(password)
            .tcp_connect_timeout(connect_timeout)
            .init(vec![format!("SET NAMES {charset}")]);
        Conn::new(opts).map_err(|e| Error::native_connection_failed(NativeError::from(e)))
    }

    fn transaction_statement(&mut self, op: TransactionOp) -> Result<(), NativeError> {
        let sql = match op {
            TransactionOp::Begin => "START TRANSACTION",
            TransactionOp::Commit => "COMMIT",
            TransactionOp::Rollback => "ROLLBACK",
        };
        self.query_drop(sql).map_err(NativeError::from)
    }

    fn native_server_version(&mut self) -> Result<String, NativeError> {
        let (major, minor, patch) = Conn::server_version(self);
        Ok(format!("{major}.{minor}.{patch}"))
    }
}
