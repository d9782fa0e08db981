//! Script handling
//!
//! Resolves which scripts to run and applies them.

pub mod apply;
pub mod manifest;

pub use apply::{apply_script, apply_scripts, AppliedBatch};
pub use manifest::{parse_manifest, resolve, ScriptId, ScriptList};
