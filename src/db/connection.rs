//! Database connection management
//!
//! Opens the single connection a run uses and scopes the one transaction
//! scripts are applied in.

use rusqlite::{Connection, OpenFlags, Transaction};
use tracing::{debug, warn};

use crate::error::{ExecError, Result};

/// A single open database connection
///
/// The connection is closed when this value is dropped.
pub struct Database {
    conn: Connection,
}

/// Strip a `sqlite:` or `sqlite://` scheme; anything else is passed to
/// SQLite unchanged.
fn database_target(connection: &str) -> &str {
    connection
        .strip_prefix("sqlite://")
        .or_else(|| connection.strip_prefix("sqlite:"))
        .unwrap_or(connection)
}

impl Database {
    /// Open a connection from a SQLite path, `file:` URI, or
    /// `sqlite:`/`sqlite://` URL
    pub fn open(connection: &str) -> Result<Self> {
        debug!(connection, "opening database connection");

        let conn = Connection::open_with_flags(
            database_target(connection),
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(ExecError::Connect)?;

        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(ExecError::Connect)?;

        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Run `f` inside one transaction.
    ///
    /// Commits when `f` succeeds. When `f` fails the transaction is rolled
    /// back and `f`'s error is returned; a failing rollback is only logged.
    pub fn with_transaction<F, T>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let tx = self.conn.transaction().map_err(ExecError::Begin)?;
        debug!("transaction started");

        match f(&tx) {
            Ok(value) => {
                tx.commit().map_err(ExecError::Commit)?;
                debug!("transaction committed");
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    warn!(error = %rollback_err, "rollback failed");
                } else {
                    debug!("transaction rolled back");
                }
                Err(err)
            }
        }
    }
}
