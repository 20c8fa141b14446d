use clap::{Parser, Subcommand};

pub mod commands;

#[derive(Parser)]
#[command(name = "chainpilot")]
#[command(about = "⛓  chainpilot - blockchain agent command companion")]
#[command(
    long_about = "Issue blockchain commands to an execution agent either as structured \
                  manual commands or as natural-language chat translated by a language model"
)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a natural-language request through the resolver
    Chat {
        /// Free-text request, e.g. "create a token named SuperCoin with symbol SPC"
        message: String,
    },

    /// Submit a structured command in manual mode
    Send {
        /// Command kind, e.g. TRANSFER_NATIVE or transfer-native
        kind: String,
        /// Field values as NAME=VALUE, repeatable
        #[arg(short, long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,
    },

    /// Describe the available command kinds and their fields
    Describe {
        /// Limit the listing to one command kind
        kind: Option<String>,
    },

    /// Query the agent for its public wallet address
    Address,

    /// Manage the HMAC secret used to sign agent requests
    Secret {
        #[command(subcommand)]
        action: SecretAction,
    },

    /// Start the API server for browser and external front ends
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to bind to
        #[arg(long, default_value = "7777")]
        port: u16,
    },
}

#[derive(Subcommand)]
pub enum SecretAction {
    /// Show the current signing secret
    Show,
    /// Replace the signing secret with a freshly generated one
    Rotate,
}
