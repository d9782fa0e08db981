//! Run configuration
//!
//! Parameters are gathered once at startup and passed into the core
//! explicitly; nothing below this module reads the process environment.

use std::path::PathBuf;

use crate::error::{ExecError, Result};

/// Manifest file name; requesting this name runs every script it lists
pub const MANIFEST_FILE: &str = "database.init";

/// Environment variable holding the connection string when none is given
pub const CONNECTION_ENV_VAR: &str = "DATABASE_URL";

/// Directory scripts are resolved against by default
pub const DEFAULT_SCRIPT_DIR: &str = "./db/scripts";

/// Immutable parameters for a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Script to run, or [`MANIFEST_FILE`] to run the manifest
    pub script: String,
    /// Directory script and manifest names are relative to
    pub script_dir: PathBuf,
    /// SQLite database path or `file:` URI
    pub connection: String,
}

impl RunConfig {
    pub fn new(
        script: impl Into<String>,
        script_dir: impl Into<PathBuf>,
        connection: impl Into<String>,
    ) -> Self {
        Self {
            script: script.into(),
            script_dir: script_dir.into(),
            connection: connection.into(),
        }
    }
}

/// Pick the connection string: an explicit value wins, otherwise
/// [`CONNECTION_ENV_VAR`] is read through `lookup`.
pub fn resolve_connection_string<F>(explicit: Option<String>, lookup: F) -> Result<String>
where
    F: FnOnce(&str) -> Option<String>,
{
    explicit
        .or_else(|| lookup(CONNECTION_ENV_VAR))
        .filter(|s| !s.trim().is_empty())
        .ok_or(ExecError::MissingConnectionString(CONNECTION_ENV_VAR))
}
