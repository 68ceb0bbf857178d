use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{open_store, resolve_board};
use crate::cli::OutputFormat;
use crate::cli::utils::output_success;

#[derive(Subcommand)]
pub enum SyncCommands {
    #[command(about = "Fetch all boards, containers and tasks for the current user")]
    Pull,

    #[command(about = "Upload a board's containers and tasks (defaults to the selected board)")]
    Push {
        #[arg(long, help = "Board ID")]
        board: Option<i64>,
    },
}

pub async fn handle(cmd: SyncCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut store = open_store()?;

    match cmd {
        SyncCommands::Pull => {
            store.load_user_data().await?;
            let state = store.state();
            output_success(
                &output_format,
                &format!(
                    "Loaded {} boards, {} containers, {} tasks",
                    state.boards.len(),
                    state.containers.len(),
                    state.tasks.len()
                ),
                Some(json!({
                    "boards": state.boards.len(),
                    "containers": state.containers.len(),
                    "tasks": state.tasks.len(),
                    "selected_board": state.selected_board,
                })),
            )
        }
        SyncCommands::Push { board } => {
            let board_id = resolve_board(&store, board)?;
            store.push_board_layout(board_id).await?;
            output_success(
                &output_format,
                &format!("Saved layout of board {}", board_id),
                Some(json!({ "board_id": board_id })),
            )
        }
    }
}
