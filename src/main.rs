use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use snackpub::config::Config;
use snackpub::server;

#[derive(Parser)]
#[command(name = "snackpub")]
#[command(version, about = "Receives snack reviews from Slack and publishes them to a GitHub-hosted site")]
pub struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "8787")]
    pub port: u16,

    /// Interface to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Enable debug-level logging for snackpub modules
    #[arg(short, long)]
    pub verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::from_env().context("Failed to load configuration")?;
    server::start_server(config, &cli.host, cli.port).await
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "snackpub=debug,info" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}
