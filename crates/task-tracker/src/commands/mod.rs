use std::process::ExitCode;

use anyhow::{Context, Result};
use serde::Serialize;
use task_tracker_app::{TaskService, TaskStore};
use task_tracker_core::{Status, TaskId};

use crate::{Command, ListFormat};

mod render;

pub fn run<S: TaskStore>(command: Command, service: &TaskService<S>) -> Result<ExitCode> {
    match command {
        Command::Add { description } => {
            let id = service
                .add(&description)
                .context("could not add the task to the data file")?;
            println!("Task added successfully (ID: {id})");
            Ok(ExitCode::SUCCESS)
        }
        Command::Update { id, description } => {
            let found = service
                .update(id, &description)
                .context("could not update the task in the data file")?;
            Ok(report(found, id, "Task updated successfully"))
        }
        Command::Delete { id } => {
            let found = service
                .delete(id)
                .context("could not delete the task from the data file")?;
            Ok(report(found, id, "Task deleted successfully"))
        }
        Command::MarkTodo { id } => mark(service, id, Status::Todo),
        Command::MarkInProgress { id } => mark(service, id, Status::InProgress),
        Command::MarkDone { id } => mark(service, id, Status::Done),
        Command::List { filter, format } => {
            let tasks = service
                .find(filter)
                .context("could not load the tasks from the data file")?;
            match format {
                ListFormat::Json => println!("{}", to_json(&tasks)?),
                ListFormat::Table => print!("{}", render::task_table(&tasks)),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Show { id } => {
            let task = service
                .get(id)
                .context("could not load the tasks from the data file")?;
            match task {
                Some(task) => {
                    println!("{}", to_json(&task)?);
                    Ok(ExitCode::SUCCESS)
                }
                None => Ok(report(false, id, "")),
            }
        }
    }
}

fn mark<S: TaskStore>(service: &TaskService<S>, id: TaskId, status: Status) -> Result<ExitCode> {
    let found = service
        .set_status(id, status)
        .with_context(|| format!("could not mark the task as {status} in the data file"))?;
    Ok(report(found, id, &format!("Task marked as {status} successfully")))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("could not encode the tasks as JSON")
}

// Not found exits with status 1, unlike the success path.
fn report(found: bool, id: TaskId, success: &str) -> ExitCode {
    if found {
        println!("{success}");
        ExitCode::SUCCESS
    } else {
        println!("Task(ID: {id}) not found");
        ExitCode::FAILURE
    }
}
