//! Script application
//!
//! Reads each script and executes it as one batch, strictly in list order.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use rusqlite::Connection;
use tracing::info;

use super::manifest::ScriptList;
use crate::error::{ExecError, Result};

/// Scripts applied by a successful batch, as resolved paths in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedBatch {
    pub applied: Vec<PathBuf>,
}

/// Read and execute a single script file
pub fn apply_script(conn: &Connection, path: &Path) -> Result<()> {
    let sql = fs::read_to_string(path).map_err(|source| ExecError::ScriptRead {
        path: path.to_path_buf(),
        source,
    })?;

    conn.execute_batch(&sql)
        .map_err(|source| ExecError::ScriptExecute {
            path: path.to_path_buf(),
            source,
        })
}

/// Apply every script in `scripts` against `conn`, stopping at the first
/// failure. Each applied script's path is written to `progress` as one line.
///
/// `conn` is expected to be inside a transaction; nothing here commits.
pub fn apply_scripts<W: Write>(
    conn: &Connection,
    scripts: &ScriptList,
    script_dir: &Path,
    progress: &mut W,
) -> Result<AppliedBatch> {
    let mut batch = AppliedBatch::default();

    for id in scripts {
        let path = script_dir.join(id).clean();
        apply_script(conn, &path)?;

        writeln!(progress, "{}", path.display()).map_err(ExecError::Progress)?;
        info!(script = %path.display(), "applied script");

        batch.applied.push(path);
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripts::parse_manifest;
    use tempfile::TempDir;

    fn write_script(dir: &TempDir, name: &str, sql: &str) {
        fs::write(dir.path().join(name), sql).unwrap();
    }

    fn progress_lines(out: &[u8]) -> Vec<String> {
        String::from_utf8(out.to_vec())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_apply_in_order() {
        let dir = TempDir::new().unwrap();
        write_script(&dir, "a.sql", "CREATE TABLE marker (step INTEGER);");
        write_script(&dir, "b.sql", "INSERT INTO marker VALUES (1); INSERT INTO marker VALUES (2);");

        let conn = Connection::open_in_memory().unwrap();
        let mut out = Vec::new();
        let batch =
            apply_scripts(&conn, &parse_manifest("a.sql\nb.sql"), dir.path(), &mut out).unwrap();

        assert_eq!(
            batch.applied,
            vec![dir.path().join("a.sql"), dir.path().join("b.sql")]
        );
        assert_eq!(
            progress_lines(&out),
            vec![
                dir.path().join("a.sql").display().to_string(),
                dir.path().join("b.sql").display().to_string(),
            ]
        );

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM marker", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 2);
    }

    #[test]
    fn test_out_of_order_fails() {
        let dir = TempDir::new().unwrap();
        write_script(&dir, "a.sql", "CREATE TABLE marker (step INTEGER);");
        write_script(&dir, "b.sql", "INSERT INTO marker VALUES (1);");

        let conn = Connection::open_in_memory().unwrap();
        let mut out = Vec::new();
        let err =
            apply_scripts(&conn, &parse_manifest("b.sql\na.sql"), dir.path(), &mut out).unwrap_err();

        assert!(matches!(err, ExecError::ScriptExecute { ref path, .. } if path.ends_with("b.sql")));
        assert!(out.is_empty());
    }

    #[test]
    fn test_stops_at_first_failure() {
        let dir = TempDir::new().unwrap();
        write_script(&dir, "a.sql", "CREATE TABLE a (id INTEGER);");
        write_script(&dir, "b.sql", "CREATE TABLE oops (;");
        write_script(&dir, "c.sql", "CREATE TABLE c (id INTEGER);");

        let conn = Connection::open_in_memory().unwrap();
        let mut out = Vec::new();
        let err = apply_scripts(&conn, &parse_manifest("a.sql\nb.sql\nc.sql"), dir.path(), &mut out)
            .unwrap_err();

        assert!(matches!(err, ExecError::ScriptExecute { .. }));
        assert_eq!(progress_lines(&out).len(), 1);

        let c_tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name = 'c'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(c_tables, 0);
    }

    #[test]
    fn test_missing_script_file() {
        let dir = TempDir::new().unwrap();
        let conn = Connection::open_in_memory().unwrap();
        let mut out = Vec::new();

        let err = apply_scripts(&conn, &parse_manifest("missing.sql"), dir.path(), &mut out)
            .unwrap_err();
        match err {
            ExecError::ScriptRead { path, source } => {
                assert_eq!(path, dir.path().join("missing.sql"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_reported_paths_are_cleaned() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("schema")).unwrap();
        write_script(&dir, "schema/a.sql", "CREATE TABLE a (id INTEGER);");

        let script_dir = dir.path().join(".").join("schema");
        let conn = Connection::open_in_memory().unwrap();
        let mut out = Vec::new();
        let batch = apply_scripts(&conn, &parse_manifest("./a.sql"), &script_dir, &mut out)
            .unwrap();

        let expected = dir.path().join("schema").join("a.sql");
        assert_eq!(batch.applied, vec![expected.clone()]);
        assert_eq!(progress_lines(&out), vec![expected.display().to_string()]);
    }

    #[test]
    fn test_empty_list_applies_nothing() {
        let dir = TempDir::new().unwrap();
        let conn = Connection::open_in_memory().unwrap();
        let mut out = Vec::new();

        let batch = apply_scripts(&conn, &parse_manifest(""), dir.path(), &mut out).unwrap();
        assert!(batch.applied.is_empty());
        assert!(out.is_empty());
    }
}
