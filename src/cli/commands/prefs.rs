use clap::Subcommand;
use serde_json::json;

use crate::cli::config::open_store;
use crate::cli::utils::{output_success, output_value};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum PrefsCommands {
    #[command(about = "Show or set the background")]
    Background {
        #[arg(help = "Background value (omit to show current)")]
        value: Option<String>,
        #[arg(long, conflicts_with = "value", help = "Clear the background")]
        clear: bool,
    },

    #[command(about = "Show or set the theme")]
    Theme {
        #[arg(help = "Theme name (omit to show current)")]
        value: Option<String>,
        #[arg(long, conflicts_with = "value", help = "Clear the theme")]
        clear: bool,
    },
}

pub async fn handle(cmd: PrefsCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut store = open_store()?;

    match cmd {
        PrefsCommands::Background { value, clear } => {
            if value.is_some() || clear {
                store.set_background(value.clone())?;
                return output_success(&output_format, "Background updated", Some(json!({ "background": value })));
            }
            let current = store.background();
            output_value(&output_format, json!({ "background": current }), || {
                println!("Background: {}", current.unwrap_or("(none)"));
            })
        }
        PrefsCommands::Theme { value, clear } => {
            if value.is_some() || clear {
                store.set_theme(value.clone())?;
                return output_success(&output_format, "Theme updated", Some(json!({ "theme": value })));
            }
            let current = store.theme();
            output_value(&output_format, json!({ "theme": current }), || {
                println!("Theme: {}", current.unwrap_or("(none)"));
            })
        }
    }
}
