//! Error types
//!
//! Every failure of a run is fatal; the variants only tell the operator where
//! it happened and whether the transaction was involved.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to read manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no connection string given and {0} is not set")]
    MissingConnectionString(&'static str),

    #[error("failed to open database connection: {0}")]
    Connect(#[source] rusqlite::Error),

    #[error("failed to begin transaction: {0}")]
    Begin(#[source] rusqlite::Error),

    #[error("failed to read script {}: {source}", .path.display())]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to execute script {}: {source}", .path.display())]
    ScriptExecute {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to report progress: {0}")]
    Progress(#[source] io::Error),

    #[error("failed to commit transaction: {0}")]
    Commit(#[source] rusqlite::Error),
}

#[cfg(test)]
impl ExecError {
    /// Whether the failure happened inside the transaction, after it was begun
    /// and before commit was issued. Such failures are rolled back.
    pub(crate) fn rolls_back(&self) -> bool {
        matches!(
            self,
            ExecError::ScriptRead { .. } | ExecError::ScriptExecute { .. } | ExecError::Progress(_)
        )
    }
}

/// Result type for execdb operations
pub type Result<T> = std::result::Result<T, ExecError>;
