use ::postgres::{Client, Config, NoTls};

use crate::base::NativeHandle;
use crate::dsn::Dsn;
use crate::error::{Error, NativeError, Result, TransactionOp};
use crate::options::ConnectionOptions;
use crate::types::Driver;

impl NativeHandle for Client {
    const DRIVER: Driver = Driver::Pgsql;

    fn open_native(
        dsn: &Dsn,
        user: Option<&str>,
        password: Option<&str>,
        options: &ConnectionOptions,
    ) -> Result<Self> {
        let mut config = Config::new();
        config
            .host(dsn.require("host")?)
            .port(dsn.require_port()?)
            .dbname(dsn.require("dbname")?);
        if let Some(user) = user {
            config.user(user);
        }
        if let Some(password) = password {
            config.password(password);
        }
        if let Some(timeout) = options.timeout(Driver::Pgsql)? {
            config.connect_timeout(timeout);
        }
        config
            .connect(NoTls)
            .map_err(|e| Error::native_connection_failed(NativeError::from(e)))
    }

    fn transaction_statement(&mut self, op: TransactionOp) -> Result<(), NativeError> {
        let sql = match op {
            TransactionOp::Begin => "BEGIN",
            TransactionOp::Commit => "COMMIT",
            TransactionOp::Rollback => "ROLLBACK",
        };
        self.batch_execute(sql).map_err(NativeError::from)
    }

    fn native_server_version(&mut self) -> Result<String, NativeError> {
        let row = self.query_one("SHOW server_version", &[])?;
        Ok(row.try_get(0)?)
    }
}
