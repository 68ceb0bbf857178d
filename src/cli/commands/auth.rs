use clap::Subcommand;
use serde_json::json;

use crate::cli::config::open_store;
use crate::cli::utils::{output_success, output_value};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to server")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout from server")]
    Logout {
        #[arg(long, help = "Clear the local session even if the server call fails")]
        force: bool,
    },

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Show current user information")]
    Whoami,

    #[command(about = "Register new user")]
    Signup {
        #[arg(help = "Username")]
        username: String,
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut store = open_store()?;

    match cmd {
        AuthCommands::Login { username, password } => {
            let password = resolve_password(password, false)?;
            let user = store.login(&username, &password).await?;
            output_success(
                &output_format,
                &format!("Logged in as {}", user.username),
                Some(json!({ "user": user })),
            )
        }
        AuthCommands::Signup { username, email, password } => {
            let password = resolve_password(password, true)?;
            let user = store.signup(&username, &email, &password).await?;
            output_success(
                &output_format,
                &format!("Signed up and logged in as {}", user.username),
                Some(json!({ "user": user })),
            )
        }
        AuthCommands::Logout { force } => {
            match store.logout().await {
                Ok(()) => output_success(&output_format, "Logged out", None),
                Err(e) if force => {
                    tracing::warn!(error = %e, "remote logout failed, clearing local session");
                    store.forget_session()?;
                    output_success(&output_format, "Local session cleared (server logout failed)", None)
                }
                Err(e) => Err(e.into()),
            }
        }
        AuthCommands::Status => {
            let session = store.session();
            output_value(
                &output_format,
                json!({
                    "authenticated": session.is_authenticated,
                    "username": session.user.as_ref().map(|u| u.username.clone()),
                    "has_token": session.token.is_some(),
                }),
                || match &session.user {
                    Some(user) if session.is_authenticated => println!("Authenticated as {}", user.username),
                    _ => println!("Not authenticated"),
                },
            )
        }
        AuthCommands::Whoami => match store.user() {
            Some(user) => output_value(&output_format, json!({ "user": user }), || {
                println!("ID: {}", user.id);
                println!("Username: {}", user.username);
                if !user.email.is_empty() {
                    println!("Email: {}", user.email);
                }
            }),
            None => Err(anyhow::anyhow!("Not logged in")),
        },
    }
}

fn resolve_password(provided: Option<String>, confirm: bool) -> anyhow::Result<String> {
    if let Some(password) = provided {
        return Ok(password);
    }

    let mut prompt = dialoguer::Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    Ok(prompt.interact()?)
}
