use tracing::{debug, info, warn};

use crate::dsn::Dsn;
use crate::error::{Error, NativeError, Result, TransactionOp};
use crate::options::ConnectionOptions;
use crate::types::Driver;

/// What the shared base needs from a native driver handle.
pub(crate) trait NativeHandle: Sized {
    const DRIVER: Driver;

    /// Opens a handle to the target named by `dsn`. `options` is already merged over the defaults.
    fn open_native(
        dsn: &Dsn,
        user: Option<&str>,
        password: Option<&str>,
        options: &ConnectionOptions,
    ) -> Result<Self>;

    fn transaction_statement(&mut self, op: TransactionOp) -> Result<(), NativeError>;

    fn native_server_version(&mut self) -> Result<String, NativeError>;

    /// Transaction state as the engine reports it, for drivers that expose it.
    fn native_in_transaction(&self) -> Option<bool> {
        None
    }
}

/// Owns one native handle and the bookkeeping shared by every driver.
pub(crate) struct ConnectionBase<H> {
    handle: Option<H>,
    database: String,
    options: ConnectionOptions,
    in_transaction: bool,
}

impl<H: NativeHandle> ConnectionBase<H> {
    pub(crate) fn connect(
        dsn: &Dsn,
        user: Option<&str>,
        password: Option<&str>,
        options: &ConnectionOptions,
        database: &str,
    ) -> Result<Self> {
        let options = options.merged_over_defaults();
        for key in options.uninterpreted_keys() {
            debug!(driver = %H::DRIVER, option = key, "option not interpreted by native driver");
        }
        debug!(driver = %H::DRIVER, %dsn, "opening connection");
        let handle = H::open_native(dsn, user, password, &options)?;
        info!(driver = %H::DRIVER, database, "connection opened");
        Ok(Self {
            handle: Some(handle),
            database: database.to_owned(),
            options,
            in_transaction: false,
        })
    }

    pub(crate) fn handle(&mut self) -> Result<&mut H> {
        self.handle.as_mut().ok_or(Error::NotConnected(H::DRIVER))
    }

    fn handle_ref(&self) -> Result<&H> {
        self.handle.as_ref().ok_or(Error::NotConnected(H::DRIVER))
    }

    pub(crate) fn is_connected(&self) -> bool {
        self.handle.is_some()
    }

    pub(crate) fn disconnect(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.native_in_transaction().unwrap_or(self.in_transaction) {
                warn!(driver = %H::DRIVER, database = %self.database, "closing connection with an open transaction");
            }
            drop(handle);
            info!(driver = %H::DRIVER, database = %self.database, "connection closed");
        }
        self.in_transaction = false;
    }

    pub(crate) fn in_transaction(&self) -> Result<bool> {
        let handle = self.handle_ref()?;
        Ok(handle.native_in_transaction().unwrap_or(self.in_transaction))
    }

    pub(crate) fn begin_transaction(&mut self) -> Result<()> {
        if self.in_transaction()? {
            return Err(Error::transaction_failed(
                H::DRIVER,
                TransactionOp::Begin,
                "a transaction is already active",
            ));
        }
        self.run_transaction_statement(TransactionOp::Begin)?;
        self.in_transaction = true;
        Ok(())
    }

    pub(crate) fn commit(&mut self) -> Result<()> {
        self.finish_transaction(TransactionOp::Commit)
    }

    pub(crate) fn rollback(&mut self) -> Result<()> {
        self.finish_transaction(TransactionOp::Rollback)
    }

    fn finish_transaction(&mut self, op: TransactionOp) -> Result<()> {
        if !self.in_transaction()? {
            return Err(Error::transaction_failed(H::DRIVER, op, "no active transaction"));
        }
        self.run_transaction_statement(op)?;
        self.in_transaction = false;
        Ok(())
    }

    fn run_transaction_statement(&mut self, op: TransactionOp) -> Result<()> {
        debug!(driver = %H::DRIVER, operation = %op, "transaction");
        self.handle()?
            .transaction_statement(op)
            .map_err(|native| Error::native_transaction_failed(op, native))
    }

    pub(crate) fn database_name(&self) -> Result<&str> {
        if self.is_connected() {
            Ok(&self.database)
        } else {
            Err(Error::NotAvailable(H::DRIVER))
        }
    }

    pub(crate) fn server_version(&mut self) -> Result<String> {
        self.handle()?
            .native_server_version()
            .map_err(|source| Error::StatementFailed {
                driver: H::DRIVER,
                statement: "server version",
                source,
            })
    }

    pub(crate) fn options(&self) -> &ConnectionOptions {
        &self.options
    }
}
