//! CLI entry point for task-tracker.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use task_tracker_app::{ProjectConfig, TaskService, TaskServiceError};
use task_tracker_core::{TaskFilter, TaskId};
use task_tracker_store_json::{JsonStore, StoreError};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod commands;

/// Track short tasks in a JSON file.
#[derive(Parser, Debug)]
#[command(
    name = "task-tracker",
    version,
    about = "task-tracker: add, update, mark and list tasks stored in a JSON file"
)]
struct Cli {
    /// Project directory holding `.task-tracker/config.toml` (defaults to current).
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Task file to use instead of the configured one.
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new task with the given description.
    Add { description: String },

    /// Replace the description of the task with the given ID.
    Update { id: TaskId, description: String },

    /// Delete the task with the given ID.
    Delete { id: TaskId },

    /// Mark the task with the given ID as 'todo'.
    MarkTodo { id: TaskId },

    /// Mark the task with the given ID as 'in-progress'.
    MarkInProgress { id: TaskId },

    /// Mark the task with the given ID as 'done'.
    MarkDone { id: TaskId },

    /// List tasks: all, todo, in-progress or done.
    List {
        #[arg(default_value = "all")]
        filter: TaskFilter,
        #[arg(long, value_enum, default_value_t = ListFormat::Table)]
        format: ListFormat,
    },

    /// Show a single task as JSON.
    Show { id: TaskId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ListFormat {
    Table,
    Json,
}

fn main() -> ExitCode {
    let Cli { dir, file, cmd } = Cli::parse();
    install_tracing();

    match execute(dir, file, cmd) {
        Ok(code) => code,
        Err(err) => {
            eprint!("{}", diagnostic(&err));
            ExitCode::FAILURE
        }
    }
}

fn execute(dir: Option<PathBuf>, file: Option<PathBuf>, command: Command) -> Result<ExitCode> {
    let workdir = dir.unwrap_or_else(|| PathBuf::from("."));
    let path = match file {
        Some(file) => file,
        None => ProjectConfig::from_workdir(&workdir)?.store_path(&workdir),
    };
    debug!(path = %path.display(), "Using task file");

    let service = TaskService::new(JsonStore::new(path));
    commands::run(command, &service)
}

fn install_tracing() {
    // RUST_LOG overrides; stdout stays reserved for command output.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Two-line report: what failed and the likely cause.
fn diagnostic(err: &anyhow::Error) -> String {
    let reason = match err.downcast_ref::<TaskServiceError>() {
        Some(TaskServiceError::Validation(_)) => "the given input is not allowed",
        Some(TaskServiceError::Store(StoreError::Corrupt { .. })) => {
            "the data file is not a valid task file; fix it or move it aside"
        }
        Some(TaskServiceError::Store(StoreError::Io { .. })) => {
            "no permission to read/write the data file, or its directory does not exist"
        }
        Some(TaskServiceError::Store(StoreError::Serialize(_))) => "a task could not be encoded",
        Some(TaskServiceError::IdsExhausted) => "every task id has been used",
        None => "the configuration or the command output could not be processed",
    };
    format!("error:              {err:#}\npossible reason:    {reason}\n")
}
