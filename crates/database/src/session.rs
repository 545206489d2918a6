use futures::future::BoxFuture;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::connection::{self, DatabaseSettings};
use crate::error::DbError;
use crate::schema;

/// Handle to the todo database.
///
/// Owns the connection pool and hands out scoped sessions. Constructed
/// explicitly at startup and passed to whatever needs it; cloning is
/// cheap (the pool is internally shared) and `shutdown` disposes it at
/// process teardown.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connects to the database described by `settings` and builds the
    /// pool. A connection failure propagates to the caller; no retry is
    /// attempted here.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, DbError> {
        let pool = connection::connect(settings).await?;
        Ok(Self { pool })
    }

    /// Builds the handle without any network I/O; the first query opens
    /// a connection. Useful for wiring up the application in tests that
    /// never touch the database.
    pub fn connect_lazy(settings: &DatabaseSettings) -> Result<Self, DbError> {
        let pool = connection::connect_lazy(settings)?;
        Ok(Self { pool })
    }

    /// The underlying pool, for single-statement reads that need no
    /// transaction scope.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Acquires a session for the caller's exclusive use.
    ///
    /// The session holds one pooled connection with an open transaction.
    /// If the pool is at its cap, this waits (up to the acquire timeout)
    /// for a connection to be released rather than failing fast.
    pub async fn session(&self) -> Result<Session, DbError> {
        let txn = self.pool.begin().await?;
        Ok(Session { txn })
    }

    /// Runs `op` inside a scoped session.
    ///
    /// On `Ok` the transaction is committed; on `Err` it is rolled back
    /// and the fault is returned unchanged. The connection goes back to
    /// the pool on every exit path, including cancellation of the
    /// calling task (the session's drop handles that).
    pub async fn with_session<T, F>(&self, op: F) -> Result<T, DbError>
    where
        F: for<'s> FnOnce(&'s mut Session) -> BoxFuture<'s, Result<T, DbError>>,
    {
        let mut session = self.session().await?;
        match op(&mut session).await {
            Ok(value) => {
                session.commit().await?;
                Ok(value)
            }
            Err(fault) => {
                // The rollback outcome must not mask the original fault.
                if let Err(rollback_fault) = session.rollback().await {
                    tracing::warn!(error = %rollback_fault, "rollback failed after session fault");
                }
                Err(fault)
            }
        }
    }

    /// Creates all registered tables and indexes if they are absent.
    ///
    /// Development and test bootstrap only. Production schema changes go
    /// through the versioned migrations (`run_migrations`), which track
    /// what has been applied.
    pub async fn initialize_schema(&self) -> Result<(), DbError> {
        for statement in schema::ddl_statements() {
            sqlx::query(&statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Applies pending versioned migrations.
    pub async fn run_migrations(&self) -> Result<(), DbError> {
        connection::run_migrations(&self.pool).await
    }

    /// Reverts the most recently applied migration.
    pub async fn revert_last_migration(&self) -> Result<(), DbError> {
        connection::revert_last_migration(&self.pool).await
    }

    /// Closes the pool and all of its connections. Idempotent; intended
    /// to run once at process teardown.
    pub async fn shutdown(&self) {
        self.pool.close().await;
    }
}

/// A scoped unit of work against the todo database.
///
/// Wraps one pooled connection with an open transaction, exclusively
/// owned by the acquirer. Consuming it with [`commit`](Session::commit)
/// persists the work; dropping it without committing (early return,
/// panic unwind, task cancellation) rolls the transaction back and
/// returns the connection to the pool.
pub struct Session {
    txn: Transaction<'static, Postgres>,
}

impl Session {
    /// The executor to run queries against within this unit of work.
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.txn
    }

    /// Commits the transaction and releases the connection.
    pub async fn commit(self) -> Result<(), DbError> {
        self.txn.commit().await?;
        Ok(())
    }

    /// Rolls the transaction back and releases the connection.
    pub async fn rollback(self) -> Result<(), DbError> {
        self.txn.rollback().await?;
        Ok(())
    }
}
