use clap::Parser;
use tracing_subscriber::EnvFilter;
use vuello::cli::{Cli, ErrorReported};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so VUELLO_API_URL and friends apply
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = vuello::cli::run(cli).await {
        if e.downcast_ref::<ErrorReported>().is_some() {
            std::process::exit(1);
        }
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }

    Ok(())
}
