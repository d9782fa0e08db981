//! execdb
//!
//! Applies an ordered list of SQL scripts to a database inside a single
//! transaction: every script commits together, or none do.

use std::io::Write;

use tracing::debug;

pub mod build_info;
pub mod config;
pub mod db;
pub mod error;
pub mod scripts;

pub use config::RunConfig;
pub use db::Database;
pub use error::{ExecError, Result};
pub use scripts::{AppliedBatch, ScriptId, ScriptList};

/// Run a whole batch as described by `config`.
///
/// The script list is resolved before any connection is opened. The
/// connection is closed before this returns, whatever the outcome.
pub fn run<W: Write>(config: &RunConfig, progress: &mut W) -> Result<AppliedBatch> {
    let scripts = scripts::resolve(&config.script, config::MANIFEST_FILE, &config.script_dir)?;
    debug!(count = scripts.len(), "resolved scripts");

    let mut database = Database::open(&config.connection)?;
    database.with_transaction(|tx| {
        scripts::apply_scripts(tx, &scripts, &config.script_dir, progress)
    })
}
