//! Connection capability and the sqlx-backed implementation

use std::future::Future;

use crate::error::Result;

/// Capability contract for executing statements against a database.
///
/// All methods are fallible round trips; errors from the backend are
/// propagated unmodified. Transaction state is exactly what the backend
/// reports: no compensating rollbacks are issued on failure.
pub trait Connection: Send {
    /// Open a new transaction
    fn begin_transaction(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Execute a statement, returning the number of affected rows
    fn execute(&mut self, sql: &str) -> impl Future<Output = Result<u64>> + Send;

    /// Commit the open transaction
    fn commit(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Roll back the open transaction
    fn rollback(&mut self) -> impl Future<Output = Result<()>> + Send;
}

/// SQLx connection wrapper over `sqlx::AnyConnection`
pub struct SqlxConnection {
    inner: sqlx::AnyConnection,
}

impl SqlxConnection {
    /// Connect to a database URL using sqlx's any-driver
    pub async fn connect(url: &str) -> Result<Self> {
        use sqlx::Connection as _;

        sqlx::any::install_default_drivers();
        let inner = sqlx::AnyConnection::connect(url).await?;
        Ok(Self { inner })
    }

    /// Wrap an existing sqlx connection
    pub fn from_connection(inner: sqlx::AnyConnection) -> Self {
        Self { inner }
    }
}

impl Connection for SqlxConnection {
    async fn begin_transaction(&mut self) -> Result<()> {
        tracing::debug!("BEGIN");
        sqlx::query("BEGIN").execute(&mut self.inner).await?;
        Ok(())
    }

    async fn execute(&mut self, sql: &str) -> Result<u64> {
        tracing::debug!(statement = %sql, "execute");
        let done = sqlx::query(sql).execute(&mut self.inner).await?;
        Ok(done.rows_affected())
    }

    async fn commit(&mut self) -> Result<()> {
        tracing::debug!("COMMIT");
        sqlx::query("COMMIT").execute(&mut self.inner).await?;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        tracing::debug!("ROLLBACK");
        sqlx::query("ROLLBACK").execute(&mut self.inner).await?;
        Ok(())
    }
}
