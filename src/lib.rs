//! # chainpilot - Blockchain Agent Command Companion
//!
//! chainpilot is the command intake and dispatch layer for a blockchain
//! execution agent. Users issue commands either as structured manual
//! submissions or as natural-language chat translated into commands by an
//! external language model; validated commands are dispatched to the agent
//! boundary and every result comes back as a uniform outcome record.
//!
//! ## Features
//!
//! - **Closed command set**: a tagged union of command variants backed by a
//!   static schema registry - adding a variant touches one table
//! - **Form-state control**: per-variant drafts that can never leak fields
//!   across variants, validated against the registry on build
//! - **Natural-language resolution**: Gemini function-calling constrained
//!   to a single tool, with local re-validation of everything it returns
//! - **Uniform outcomes**: dispatch never throws; failures are values
//! - **Signed dispatch**: HMAC-SHA256 request signatures over the agent
//!   boundary
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chainpilot::command::AgentCommand;
//! use chainpilot::dispatch::MockExecutionAgent;
//! use chainpilot::resolver::GeminiResolver;
//! use chainpilot::session::Session;
//!
//! #[tokio::main]
//! async fn main() -> chainpilot::error::ChainPilotResult<()> {
//!     let resolver = Arc::new(GeminiResolver::new()?);
//!     let agent = Arc::new(MockExecutionAgent::new());
//!     let mut session = Session::new(resolver, agent);
//!
//!     let outcome = session.submit_command(AgentCommand::GetAgentAddress).await;
//!     println!("{}", outcome.message);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod cli;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod resolver;
pub mod session;

// Re-export commonly used types
pub use auth::HmacSecret;
pub use command::{AgentCommand, CommandForm, CommandKind};
pub use config::{ChainPilotConfig, ConfigManager};
pub use dispatch::{ExecutionAgent, HttpExecutionAgent, MockExecutionAgent, Outcome};
pub use error::{ChainPilotError, ChainPilotResult};
pub use resolver::{GeminiResolver, Resolution, Resolver};
pub use session::{Conversation, ConversationEntry, Sender, Session};

/// The current version of chainpilot
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
