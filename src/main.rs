use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quiethn::app::AppContext;
use quiethn::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = cli.load_config()?;
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Serve { .. } => {
            commands::serve(&ctx).await?;
        }
        Commands::Refresh { json } => {
            commands::refresh(&ctx, json).await?;
        }
    }

    Ok(())
}
