/// Implements [`crate::connection::DatabaseConnection`] for a driver connection
/// holding `config` and `base: ConnectionBase<$handle>` fields and an
/// `establish(&config)` constructor.
macro_rules! impl_database_connection {
    ($conn:ty, $handle:ty, $driver:expr) => {
        impl $crate::connection::DatabaseConnection for $conn {
            type Handle<'a> = &'a mut $handle;

            fn handle(&mut self) -> $crate::error::Result<Self::Handle<'_>> {
                self.base.handle()
            }

            fn is_connected(&self) -> bool {
                self.base.is_connected()
            }

            fn disconnect(&mut self) {
                self.base.disconnect();
            }

            fn reconnect(&mut self) -> $crate::error::Result<()> {
                self.base.disconnect();
                self.base = Self::establish(&self.config).map_err(|e| {
                    $crate::error::Error::ReconnectFailed {
                        driver: $driver,
                        source: Box::new(e),
                    }
                })?;
                tracing::info!(driver = %$driver, "connection re-established");
                Ok(())
            }

            fn begin_transaction(&mut self) -> $crate::error::Result<()> {
                self.base.begin_transaction()
            }

            fn commit(&mut self) -> $crate::error::Result<()> {
                self.base.commit()
            }

            fn rollback(&mut self) -> $crate::error::Result<()> {
                self.base.rollback()
            }

            fn in_transaction(&self) -> $crate::error::Result<bool> {
                self.base.in_transaction()
            }

            fn database_name(&self) -> $crate::error::Result<&str> {
                self.base.database_name()
            }

            fn driver(&self) -> $crate::types::Driver {
                $driver
            }

            fn server_version(&mut self) -> $crate::error::Result<String> {
                self.base.server_version()
            }
        }
    };
}

pub(crate) use impl_database_connection;
