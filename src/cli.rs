use std::path::PathBuf;

use clap::Parser;

use crate::fields::Filter;

/// Terminal-resident to-do manager.
/// Storage defaults to ~/.taskman/tasks.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "taskman", version, about = "Terminal to-do manager")]
pub struct Cli {
    /// Path to the JSON task file.
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Filter the list starts on.
    #[arg(long, value_enum, default_value_t = Filter::All)]
    pub filter: Filter,

    /// Log file path. Defaults to taskman.log next to the task file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
