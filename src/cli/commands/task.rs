use clap::Subcommand;
use serde_json::json;

use crate::cli::config::open_store;
use crate::cli::utils::{output_empty_collection, output_success, output_value, task_line};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum TaskCommands {
    #[command(about = "List tasks of a container")]
    List {
        #[arg(help = "Container ID")]
        container: i64,
    },

    #[command(about = "Add a task to a container")]
    Add {
        #[arg(help = "Container ID")]
        container: i64,
        #[arg(help = "Task title")]
        title: String,
        #[arg(long, default_value = "", help = "Task description")]
        description: String,
    },

    #[command(about = "Update a task")]
    Update {
        #[arg(help = "Task ID")]
        id: i64,
        #[arg(long, help = "New title")]
        title: Option<String>,
        #[arg(long, help = "New description")]
        description: Option<String>,
        #[arg(long, conflicts_with = "undone", help = "Mark as completed")]
        done: bool,
        #[arg(long, help = "Mark as not completed")]
        undone: bool,
        #[arg(long, help = "Move to another container")]
        container: Option<i64>,
    },

    #[command(about = "Delete a task")]
    Delete {
        #[arg(help = "Task ID")]
        id: i64,
    },
}

pub async fn handle(cmd: TaskCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut store = open_store()?;

    match cmd {
        TaskCommands::List { container } => {
            let tasks = store.tasks_for_container(container);
            if tasks.is_empty() {
                return output_empty_collection(&output_format, "tasks", &format!("No tasks in container {}", container));
            }
            output_value(&output_format, json!({ "tasks": tasks }), || {
                for task in &tasks {
                    println!("{}", task_line(task));
                }
            })
        }
        TaskCommands::Add { container, title, description } => {
            let task = store.create_task(container, &title, &description).await?;
            output_success(
                &output_format,
                &format!("Task '{}' created with id {}", task.title, task.id),
                Some(json!({ "task": task })),
            )
        }
        TaskCommands::Update { id, title, description, done, undone, container } => {
            let mut task = store
                .state()
                .task(id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Task {} is not in the local state; run `vuello sync pull`", id))?;

            if let Some(title) = title {
                task.title = title;
            }
            if let Some(description) = description {
                task.description = description;
            }
            if let Some(container) = container {
                task.container_id = container;
            }
            if done {
                task.completed = true;
            } else if undone {
                task.completed = false;
            }

            let updated = store.update_task(&task).await?;
            output_success(
                &output_format,
                &format!("Task {} updated", updated.id),
                Some(json!({ "task": updated })),
            )
        }
        TaskCommands::Delete { id } => {
            store.delete_task(id).await?;
            output_success(&output_format, &format!("Task {} deleted", id), None)
        }
    }
}
