use clap::Subcommand;

use crate::cli::config::open_store;
use crate::cli::utils::{output_success, output_value};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum StateCommands {
    #[command(about = "Print the persisted local state")]
    Show,

    #[command(about = "Delete the persisted state and token")]
    Reset,
}

pub async fn handle(cmd: StateCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = open_store()?;

    match cmd {
        StateCommands::Show => {
            let mut value = serde_json::to_value(store.state())?;
            // Never echo the credential
            if let Some(token) = value.pointer_mut("/session/token") {
                if !token.is_null() {
                    *token = serde_json::Value::String("***".to_string());
                }
            }
            output_value(&output_format, value, || {
                let state = store.state();
                println!("Key: {}", store.persistence().key());
                println!("Authenticated: {}", state.session.is_authenticated);
                println!("Boards: {}", state.boards.len());
                println!("Containers: {}", state.containers.len());
                println!("Tasks: {}", state.tasks.len());
                match state.selected_board() {
                    Some(board) => println!("Selected board: {} ({})", board.title, board.id),
                    None => println!("Selected board: (none)"),
                }
            })
        }
        StateCommands::Reset => {
            store.persistence().clear()?;
            output_success(&output_format, "Local state cleared", None)
        }
    }
}
