use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{open_store, resolve_board};
use crate::cli::utils::{container_line, output_empty_collection, output_success, output_value};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ContainerCommands {
    #[command(about = "List containers of a board (defaults to the selected board)")]
    List {
        #[arg(long, help = "Board ID")]
        board: Option<i64>,
    },

    #[command(about = "Refresh containers of a board from the server")]
    Pull {
        #[arg(long, help = "Board ID")]
        board: Option<i64>,
    },

    #[command(about = "Create a container")]
    Create {
        #[arg(help = "Container title")]
        title: String,
        #[arg(long, help = "Board ID")]
        board: Option<i64>,
    },

    #[command(about = "Rename a container")]
    Rename {
        #[arg(help = "Container ID")]
        id: i64,
        #[arg(help = "New title")]
        title: String,
    },

    #[command(about = "Delete a container and its tasks")]
    Delete {
        #[arg(help = "Container ID")]
        id: i64,
    },
}

pub async fn handle(cmd: ContainerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut store = open_store()?;

    match cmd {
        ContainerCommands::List { board } => {
            let board_id = resolve_board(&store, board)?;
            let containers = store.containers_for_board(board_id);
            if containers.is_empty() {
                return output_empty_collection(&output_format, "containers", &format!("No containers on board {}", board_id));
            }
            output_value(&output_format, json!({ "containers": containers }), || {
                for container in &containers {
                    println!("{}", container_line(container, store.tasks_for_container(container.id).len()));
                }
            })
        }
        ContainerCommands::Pull { board } => {
            let board_id = resolve_board(&store, board)?;
            let count = store.load_containers(board_id).await?;
            output_success(
                &output_format,
                &format!("Loaded {} containers for board {}", count, board_id),
                Some(json!({ "board_id": board_id, "containers": count })),
            )
        }
        ContainerCommands::Create { title, board } => {
            let board_id = resolve_board(&store, board)?;
            let container = store.create_container(board_id, &title).await?;
            output_success(
                &output_format,
                &format!("Container '{}' created with id {}", container.title, container.id),
                Some(json!({ "container": container })),
            )
        }
        ContainerCommands::Rename { id, title } => {
            store.rename_container(id, &title).await?;
            output_success(&output_format, &format!("Container {} renamed to '{}'", id, title), None)
        }
        ContainerCommands::Delete { id } => {
            store.delete_container(id).await?;
            output_success(&output_format, &format!("Container {} deleted", id), None)
        }
    }
}
