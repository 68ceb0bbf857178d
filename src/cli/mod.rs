pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

#[derive(Parser)]
#[command(name = "vuello")]
#[command(about = "Vuello CLI - boards, lists and tasks from the command line")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, signup and session status")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Synchronize local state with the server")]
    Sync {
        #[command(subcommand)]
        cmd: commands::sync::SyncCommands,
    },

    #[command(about = "Board management")]
    Board {
        #[command(subcommand)]
        cmd: commands::board::BoardCommands,
    },

    #[command(about = "Containers (lists) within a board")]
    Container {
        #[command(subcommand)]
        cmd: commands::container::ContainerCommands,
    },

    #[command(about = "Tasks within a container")]
    Task {
        #[command(subcommand)]
        cmd: commands::task::TaskCommands,
    },

    #[command(about = "Background and theme preferences")]
    Prefs {
        #[command(subcommand)]
        cmd: commands::prefs::PrefsCommands,
    },

    #[command(about = "Inspect or reset the persisted local state")]
    State {
        #[command(subcommand)]
        cmd: commands::state::StateCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    let result = match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, output_format.clone()).await,
        Commands::Sync { cmd } => commands::sync::handle(cmd, output_format.clone()).await,
        Commands::Board { cmd } => commands::board::handle(cmd, output_format.clone()).await,
        Commands::Container { cmd } => commands::container::handle(cmd, output_format.clone()).await,
        Commands::Task { cmd } => commands::task::handle(cmd, output_format.clone()).await,
        Commands::Prefs { cmd } => commands::prefs::handle(cmd, output_format.clone()).await,
        Commands::State { cmd } => commands::state::handle(cmd, output_format.clone()).await,
    };

    report(result, &output_format)
}

/// Returned once an error has already been written to stdout as JSON,
/// so the binary exits without printing it again
#[derive(Debug, thiserror::Error)]
#[error("error already reported")]
pub struct ErrorReported;

fn report(result: anyhow::Result<()>, output_format: &OutputFormat) -> anyhow::Result<()> {
    let Err(e) = result else {
        return Ok(());
    };

    if let Some(store_err) = e.downcast_ref::<StoreError>() {
        if store_err.is_unauthorized() {
            eprintln!("Hint: the stored session was rejected, run `vuello auth login` again");
        }
        if let OutputFormat::Json = output_format {
            utils::output_error(output_format, &store_err.to_string(), Some(store_err.error_code()))?;
            return Err(ErrorReported.into());
        }
    }

    Err(e)
}
