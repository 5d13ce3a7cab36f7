use crate::error::Result;
use crate::types::Driver;

/// Operations every connection supports, whatever the engine.
///
/// Queries run directly against the native handle returned by
/// [`DatabaseConnection::handle`]; this trait only covers the handle's
/// lifecycle, transaction control and metadata.
pub trait DatabaseConnection {
    /// Mutable borrow of the native driver handle.
    type Handle<'a>
    where
        Self: 'a;

    /// # Errors
    /// Returns `Error::NotConnected` if the connection has been closed.
    fn handle(&mut self) -> Result<Self::Handle<'_>>;

    /// Never fails.
    fn is_connected(&self) -> bool;

    /// Releases the native handle. Calling it again is a no-op.
    fn disconnect(&mut self);

    /// Closes the current handle, if any, and opens a fresh one from the
    /// configuration this connection was created with.
    ///
    /// # Errors
    /// Returns `Error::ReconnectFailed` wrapping the reason the new handle could not be opened.
    fn reconnect(&mut self) -> Result<()>;

    /// # Errors
    /// Returns `Error::NotConnected` when closed, or `Error::TransactionFailed`
    /// if a transaction is already active or the engine rejects the statement.
    fn begin_transaction(&mut self) -> Result<()>;

    /// # Errors
    /// Returns `Error::NotConnected` when closed, or `Error::TransactionFailed`
    /// if no transaction is active or the engine rejects the commit.
    fn commit(&mut self) -> Result<()>;

    /// # Errors
    /// Returns `Error::NotConnected` when closed, or `Error::TransactionFailed`
    /// if no transaction is active or the engine rejects the rollback.
    fn rollback(&mut self) -> Result<()>;

    /// Unlike [`DatabaseConnection::is_connected`] this needs an open handle.
    ///
    /// # Errors
    /// Returns `Error::NotConnected` if the connection has been closed.
    fn in_transaction(&self) -> Result<bool>;

    /// # Errors
    /// Returns `Error::NotAvailable` if the connection has been closed.
    fn database_name(&self) -> Result<&str>;

    fn driver(&self) -> Driver;

    fn driver_name(&self) -> &'static str {
        self.driver().as_str()
    }

    /// # Errors
    /// Returns `Error::NotConnected` when closed, or `Error::StatementFailed`
    /// if the engine cannot report its version.
    fn server_version(&mut self) -> Result<String>;
}
