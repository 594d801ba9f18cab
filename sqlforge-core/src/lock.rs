//! Lock coordinator
//!
//! Not every dialect has native `SELECT ... FOR UPDATE` syntax; some emulate
//! row locks by forcing a read inside an explicit transaction and relying on
//! the engine's locking behavior on read. The coordinator therefore runs a
//! two-phase protocol: `acquire` opens a transaction and issues every pending
//! locking statement, `release` commits or rolls back. There is no automatic
//! release on drop; callers must release explicitly or the transaction leaks.

use crate::connection::Connection;
use crate::dialect::Dialect;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LockState {
    Idle,
    Pending,
    Held,
}

/// Two-phase lock coordinator bound to a dialect and a connection
pub struct LockBuilder<D: Dialect, C: Connection> {
    dialect: D,
    connection: C,
    statements: Vec<String>,
    state: LockState,
}

impl<D: Dialect, C: Connection> LockBuilder<D, C> {
    /// Create a new lock coordinator over the given connection
    pub fn new(dialect: D, connection: C) -> Self {
        Self {
            dialect,
            connection,
            statements: Vec::new(),
            state: LockState::Idle,
        }
    }

    /// Add a lock definition for one table; hints may be ignored by
    /// dialects without hint support
    pub fn add(&mut self, table: &str, hints: &[&str]) -> Result<&mut Self> {
        if self.state == LockState::Held {
            return Err(Error::invalid_instruction(
                "locks are already held; release them before adding more",
            ));
        }
        self.statements.push(self.dialect.lock_statement(table, hints));
        self.state = LockState::Pending;
        Ok(self)
    }

    /// Acquire the pending locks: open a transaction, then execute every
    /// pending locking statement in insertion order.
    ///
    /// The pending set is drained. Once the transaction is open, a failing
    /// statement leaves it open; the caller is responsible for
    /// `release("ROLLBACK")`.
    pub async fn acquire(&mut self) -> Result<&mut Self> {
        if self.state == LockState::Held {
            return Err(Error::invalid_instruction(
                "locks are already held; release them before acquiring again",
            ));
        }
        self.connection.begin_transaction().await?;
        self.state = LockState::Held;
        for sql in std::mem::take(&mut self.statements) {
            tracing::debug!(statement = %sql, "acquiring lock");
            self.connection.execute(&sql).await?;
        }
        Ok(self)
    }

    /// Release all acquired locks. `"ROLLBACK"` (case-insensitive) rolls the
    /// transaction back; any other method commits.
    pub async fn release(&mut self, method: &str) -> Result<&mut Self> {
        if self.state != LockState::Held {
            return Err(Error::invalid_instruction(
                "no locks are held; acquire before releasing",
            ));
        }
        if method.eq_ignore_ascii_case("ROLLBACK") {
            tracing::debug!("releasing locks with rollback");
            self.connection.rollback().await?;
        } else {
            tracing::debug!("releasing locks with commit");
            self.connection.commit().await?;
        }
        self.state = LockState::Idle;
        Ok(self)
    }

    /// Give the underlying connection back to the caller
    pub fn into_connection(self) -> C {
        self.connection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{Ansi, Firebird, Mssql};
    use crate::lock;
    use std::sync::{Arc, Mutex};

    // Recording mock: every call is appended to a shared event log.
    #[derive(Clone)]
    struct MockConnection {
        events: Arc<Mutex<Vec<String>>>,
        fail_on: Option<&'static str>,
    }

    impl MockConnection {
        fn new() -> Self {
            Self {
                events: Arc::new(Mutex::new(Vec::new())),
                fail_on: None,
            }
        }

        fn failing_on(fragment: &'static str) -> Self {
            Self {
                events: Arc::new(Mutex::new(Vec::new())),
                fail_on: Some(fragment),
            }
        }

        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }

        fn record(&self, event: String) -> Result<()> {
            if let Some(fragment) = self.fail_on {
                if event.contains(fragment) {
                    return Err(Error::invalid_instruction(format!(
                        "mock failure on '{event}'"
                    )));
                }
            }
            self.events.lock().unwrap().push(event);
            Ok(())
        }
    }

    impl Connection for MockConnection {
        async fn begin_transaction(&mut self) -> Result<()> {
            self.record("BEGIN".to_string())
        }

        async fn execute(&mut self, sql: &str) -> Result<u64> {
            self.record(format!("EXECUTE {sql}"))?;
            Ok(1)
        }

        async fn commit(&mut self) -> Result<()> {
            self.record("COMMIT".to_string())
        }

        async fn rollback(&mut self) -> Result<()> {
            self.record("ROLLBACK".to_string())
        }
    }

    #[tokio::test]
    async fn test_acquire_executes_in_insertion_order() {
        let connection = MockConnection::new();
        let mut locks = lock(Firebird, connection.clone());
        locks.add("accounts", &[]).unwrap();
        locks.add("orders", &[]).unwrap();
        locks.acquire().await.unwrap();

        assert_eq!(
            connection.events(),
            vec![
                "BEGIN".to_string(),
                "EXECUTE SELECT * FROM \"accounts\" WHERE \"ID\" = 1 WITH LOCK;".to_string(),
                "EXECUTE SELECT * FROM \"orders\" WHERE \"ID\" = 1 WITH LOCK;".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_release_commits_by_default_token() {
        let connection = MockConnection::new();
        let mut locks = lock(Ansi, connection.clone());
        locks.add("accounts", &[]).unwrap();
        locks.acquire().await.unwrap();
        locks.release("COMMIT").await.unwrap();
        assert_eq!(connection.events().last().unwrap(), "COMMIT");

        // Any token other than ROLLBACK commits.
        locks.add("accounts", &[]).unwrap();
        locks.acquire().await.unwrap();
        locks.release("whatever").await.unwrap();
        assert_eq!(connection.events().last().unwrap(), "COMMIT");
    }

    #[tokio::test]
    async fn test_release_rollback_is_case_insensitive() {
        let connection = MockConnection::new();
        let mut locks = lock(Mssql, connection.clone());
        locks.add("accounts", &[]).unwrap();
        locks.acquire().await.unwrap();
        locks.release("rollback").await.unwrap();
        assert_eq!(connection.events().last().unwrap(), "ROLLBACK");
    }

    #[tokio::test]
    async fn test_add_while_held_fails() {
        let connection = MockConnection::new();
        let mut locks = lock(Ansi, connection);
        locks.add("accounts", &[]).unwrap();
        locks.acquire().await.unwrap();
        assert!(locks.add("orders", &[]).is_err());
    }

    #[tokio::test]
    async fn test_release_without_acquire_fails() {
        let connection = MockConnection::new();
        let mut locks = lock(Ansi, connection);
        assert!(locks.release("COMMIT").await.is_err());
    }

    #[tokio::test]
    async fn test_acquire_twice_fails() {
        let connection = MockConnection::new();
        let mut locks = lock(Ansi, connection);
        locks.add("accounts", &[]).unwrap();
        locks.acquire().await.unwrap();
        assert!(locks.acquire().await.is_err());
    }

    #[tokio::test]
    async fn test_failed_acquire_leaves_transaction_releasable() {
        let connection = MockConnection::failing_on("orders");
        let mut locks = lock(Ansi, connection.clone());
        locks.add("accounts", &[]).unwrap();
        locks.add("orders", &[]).unwrap();
        assert!(locks.acquire().await.is_err());

        // The transaction is open; rolling back is the caller's duty.
        locks.release("ROLLBACK").await.unwrap();
        assert_eq!(connection.events().last().unwrap(), "ROLLBACK");
    }

    #[tokio::test]
    async fn test_acquire_drains_pending_set() {
        let connection = MockConnection::new();
        let mut locks = lock(Ansi, connection.clone());
        locks.add("accounts", &[]).unwrap();
        locks.acquire().await.unwrap();
        locks.release("COMMIT").await.unwrap();

        // A fresh acquire opens a new transaction without the old statements.
        locks.acquire().await.unwrap();
        let events = connection.events();
        assert_eq!(events.iter().filter(|e| *e == "BEGIN").count(), 2);
        assert_eq!(events.iter().filter(|e| e.starts_with("EXECUTE")).count(), 1);
    }

    #[tokio::test]
    async fn test_hints_reach_the_dialect() {
        let connection = MockConnection::new();
        let mut locks = lock(Mssql, connection.clone());
        locks.add("accounts", &["ROWLOCK", "XLOCK"]).unwrap();
        locks.acquire().await.unwrap();
        assert_eq!(
            connection.events()[1],
            "EXECUTE SELECT * FROM [accounts] WITH (ROWLOCK, XLOCK);"
        );
    }

    #[tokio::test]
    async fn test_into_connection_returns_backend() {
        let connection = MockConnection::new();
        let locks = lock(Ansi, connection);
        let returned = locks.into_connection();
        assert!(returned.events().is_empty());
    }
}
