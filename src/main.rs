//! # Taskman - Terminal Task Manager
//!
//! A single-binary to-do manager that lives in the terminal: create, edit,
//! complete, filter and delete tasks through a form and list UI, with
//! state persisted in a local JSON file.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the UI (first run seeds three example tasks)
//! taskman
//!
//! # Start on the active view with a custom task file
//! taskman --db ~/projects/side/tasks.json --filter active
//! ```
//!
//! ## Key Bindings
//!
//! - `a` add a task, `e`/Enter edit, Space/`c` toggle complete
//! - `d` delete, `x` clear completed (with confirmation)
//! - `1`/`2`/`3` or `f` switch between all/active/completed
//! - `h` help, `q`/Esc quit
//!
//! Data is stored locally in `~/.taskman/tasks.json` unless `--db` points
//! elsewhere. Logs go to a file in the same directory, never the terminal.

use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

pub mod cli;
pub mod fields;
pub mod notify;
pub mod store;
pub mod task;
pub mod validate;
pub mod view;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod form;
    pub mod input;
    pub mod run;
    pub mod utils;
}

use cli::Cli;
use store::Store;
use tui::run::run_tui;

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Determine the task file, creating ~/.taskman on demand.
    let db_path = match cli.db {
        Some(path) => path,
        None => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            let data_dir = PathBuf::from(home).join(".taskman");
            if let Err(e) = std::fs::create_dir_all(&data_dir) {
                eprintln!("Failed to create data directory {}: {}", data_dir.display(), e);
                std::process::exit(1);
            }
            data_dir.join("tasks.json")
        }
    };

    // Logging is initialized before the terminal is touched; logs go to a
    // file because ratatui owns stdout from here on.
    let default_log = db_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("taskman.log");
    let log_path = cli.log_file.unwrap_or(default_log);
    let _log_guard = init_logging(&cli.log_level, &log_path);

    tracing::info!(db = %db_path.display(), "taskman starting");

    let mut store = Store::load(&db_path);
    if store.seed_if_empty() {
        if let Err(e) = store.save() {
            tracing::warn!(error = %e, "failed to save seeded tasks");
        }
    }

    let result = run_tui(store, cli.filter);

    tracing::info!("taskman exiting");
    result
}

/// Initialize file-based logging.
///
/// Returns a [`WorkerGuard`] that must be held until shutdown so buffered
/// log entries are flushed.
fn init_logging(level: &str, log_path: &Path) -> Option<WorkerGuard> {
    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}
