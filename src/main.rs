mod command;
mod config;
mod error;
mod models;
mod render;
mod repl;
mod screen;
mod store;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Backend, Config};
use repl::Session;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use store::{JobStore, MemoryStore, MongoStore, SqliteStore};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jobmanager")]
#[command(about = "Track job applications - company, rating, notes and whether they answered")]
struct Cli {
    /// Path to the SQLite database (overrides JOBMANAGER_DB)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Dotenv file to read settings from
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    /// Keep applications in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Don't clear the screen or print the banner
    #[arg(long)]
    no_banner: bool,

    /// Run a single command (e.g. "jm -ls") and exit
    #[arg(short, long)]
    command: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    ExitCode::from(exit_status(try_main(cli)))
}

fn try_main(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.env_file, cli.db, cli.ephemeral, !cli.no_banner);
    let command = cli.command.as_deref();

    match &config.backend {
        Backend::Memory => run(MemoryStore::new(), &config, command),
        Backend::Sqlite(path) => {
            let store = SqliteStore::open(path)
                .with_context(|| format!("Failed to open database at {}", path.display()))?;
            run(store, &config, command)
        }
        Backend::Mongo(mongo) => {
            let store = MongoStore::connect(mongo).context("Failed to connect to MongoDB")?;
            run(store, &config, command)
        }
    }
}

/// Fatal errors are reported here and only here.
fn exit_status(result: Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

fn run<S: JobStore>(store: S, config: &Config, command: Option<&str>) -> Result<()> {
    info!("Using job store: {}", store.describe());

    let stdin = io::stdin();
    let stdout = io::stdout();

    match command {
        Some(line) => {
            let mut session = Session::new(store, stdin.lock(), stdout.lock());
            session.execute_line(line).context("Command failed")?;
        }
        None => {
            let mut session = Session::new(store, stdin.lock(), stdout.lock())
                .with_banner(config.show_banner);
            session.run().context("Session ended with an error")?;
        }
    }

    stdout.lock().flush()?;
    Ok(())
}
