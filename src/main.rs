use clap::Parser;
use std::process;
use tracing::{error, info};

mod api;
mod auth;
mod cli;
mod command;
mod config;
mod dispatch;
mod error;
mod resolver;
mod session;

use cli::{Args, Commands};
use error::ChainPilotResult;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(args: Args) -> ChainPilotResult<()> {
    info!("⛓  chainpilot v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Commands::Chat { message } => cli::commands::chat::handle_chat(message).await,
        Commands::Send { kind, fields } => cli::commands::send::handle_send(kind, fields).await,
        Commands::Describe { kind } => cli::commands::describe::handle_describe(kind).await,
        Commands::Address => cli::commands::address::handle_address().await,
        Commands::Secret { action } => cli::commands::secret::handle_secret(action).await,
        Commands::Serve { host, port } => {
            let session = cli::commands::build_session()?;
            api::start_api_server(&host, port, session).await
        }
    }
}
