//! Script list resolution
//!
//! Turns the requested name into the ordered list of scripts to apply.

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ExecError, Result};

/// A script file name, relative to the script directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptId(String);

impl ScriptId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for ScriptId {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

/// Scripts in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptList {
    scripts: Vec<ScriptId>,
}

impl ScriptList {
    /// A list holding exactly one script, name taken as given
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            scripts: vec![ScriptId(name.into())],
        }
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScriptId> {
        self.scripts.iter()
    }
}

impl<'a> IntoIterator for &'a ScriptList {
    type Item = &'a ScriptId;
    type IntoIter = std::slice::Iter<'a, ScriptId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Parse manifest content: one script per line, surrounding whitespace
/// trimmed, blank lines skipped, file order kept.
pub fn parse_manifest(content: &str) -> ScriptList {
    let scripts = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| ScriptId(line.to_string()))
        .collect();

    ScriptList { scripts }
}

/// Resolve the scripts to run.
///
/// `requested` equal to `manifest_name` means "every script listed in
/// `script_dir/manifest_name`"; any other name is run on its own. Listed
/// scripts are not checked for existence here.
pub fn resolve(requested: &str, manifest_name: &str, script_dir: &Path) -> Result<ScriptList> {
    if requested != manifest_name {
        debug!(script = requested, "running single script");
        return Ok(ScriptList::single(requested));
    }

    let path = script_dir.join(manifest_name);
    let content = fs::read_to_string(&path).map_err(|source| ExecError::Manifest {
        path: path.clone(),
        source,
    })?;

    let scripts = parse_manifest(&content);
    debug!(manifest = %path.display(), count = scripts.len(), "read manifest");

    Ok(scripts)
}
