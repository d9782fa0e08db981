//! execdb
//!
//! Runs SQL scripts against a database in one transaction.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use execdb::build_info::{self, BuildInfo};
use execdb::config::{self, RunConfig};

#[derive(Parser)]
#[command(
    name = "execdb",
    about = "Apply SQL scripts to a database in a single transaction",
    version,
    long_version = build_info::LONG_VERSION
)]
struct Cli {
    /// Script to execute, relative to the script directory. If not given,
    /// every script listed in database.init is executed
    #[arg(short = 'f', long = "file", default_value = config::MANIFEST_FILE)]
    file: String,

    /// Directory holding the SQL scripts
    #[arg(short = 'd', long = "dir", default_value = config::DEFAULT_SCRIPT_DIR)]
    dir: PathBuf,

    /// Connection string (SQLite path or file: URI); defaults to $DATABASE_URL
    #[arg(short = 'c', long = "connection")]
    connection: Option<String>,
}

fn run(cli: Cli) -> execdb::Result<()> {
    let connection = config::resolve_connection_string(cli.connection, |name| {
        std::env::var(name).ok()
    })?;
    let config = RunConfig::new(cli.file, cli.dir, connection);

    let stdout = std::io::stdout();
    let batch = execdb::run(&config, &mut stdout.lock())?;
    tracing::info!(count = batch.applied.len(), "batch committed");

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout only carries applied script paths
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("execdb=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(build = ?BuildInfo::current(), "starting");

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
