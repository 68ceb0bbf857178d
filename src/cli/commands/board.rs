use clap::Subcommand;
use serde_json::json;

use crate::cli::config::open_store;
use crate::cli::utils::{board_line, output_empty_collection, output_success, output_value};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum BoardCommands {
    #[command(about = "List boards (selected board marked with *)")]
    List,

    #[command(about = "Create a board")]
    Create {
        #[arg(help = "Board title")]
        title: String,
    },

    #[command(about = "Rename a board")]
    Rename {
        #[arg(help = "Board ID")]
        id: i64,
        #[arg(help = "New title")]
        title: String,
    },

    #[command(about = "Delete a board")]
    Delete {
        #[arg(help = "Board ID")]
        id: i64,
    },

    #[command(about = "Select the board other commands default to")]
    Use {
        #[arg(help = "Board ID")]
        id: i64,
    },

    #[command(about = "Show the selected board")]
    Current,
}

pub async fn handle(cmd: BoardCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut store = open_store()?;

    match cmd {
        BoardCommands::List => {
            if store.boards().is_empty() {
                return output_empty_collection(&output_format, "boards", "No boards. Run `vuello sync pull` or `vuello board create`.");
            }
            let selected = store.state().selected_board;
            output_value(
                &output_format,
                json!({ "boards": store.boards(), "selected_board": selected }),
                || {
                    for board in store.boards() {
                        println!("{}", board_line(board, Some(board.id) == selected));
                    }
                },
            )
        }
        BoardCommands::Create { title } => {
            let board = store.create_board(&title).await?;
            output_success(
                &output_format,
                &format!("Board '{}' created with id {}", board.title, board.id),
                Some(json!({ "board": board })),
            )
        }
        BoardCommands::Rename { id, title } => {
            store.update_board(id, &title).await?;
            output_success(&output_format, &format!("Board {} renamed to '{}'", id, title), None)
        }
        BoardCommands::Delete { id } => {
            store.delete_board(id).await?;
            output_success(&output_format, &format!("Board {} deleted", id), None)
        }
        BoardCommands::Use { id } => {
            store.select_board(id)?;
            output_success(
                &output_format,
                &format!("Switched to board {}", id),
                Some(json!({ "selected_board": id })),
            )
        }
        BoardCommands::Current => match store.selected_board() {
            Some(board) => output_value(&output_format, json!({ "current_board": board }), || {
                println!("Current board: {} ({})", board.title, board.id);
            }),
            None => output_value(&output_format, json!({ "current_board": null }), || {
                println!("No current board set");
            }),
        },
    }
}
