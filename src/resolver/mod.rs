// Natural-language command resolution via an external language model
use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::command::AgentCommand;
use crate::error::{ChainPilotError, ChainPilotResult};

pub mod gemini;

pub use gemini::GeminiResolver;

/// Shown when the model produced neither a structured command nor any text.
pub const NO_COMMAND_FALLBACK: &str = "I couldn't determine a specific blockchain command from \
     your request. Please try rephrasing, or switch to manual command mode for precise control.";

/// What free text resolved to. A conversational or clarifying reply is a
/// normal outcome, not a failure; only transport-level trouble reaching the
/// model surfaces as `ChainPilotError::ResolverUnavailable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Command(AgentCommand),
    Reply(String),
}

#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, prompt: &str) -> ChainPilotResult<Resolution>;
}

/// Turn the argument object of a structured tool call into a command.
///
/// Every value is coerced to its string representation first - the model may
/// return native numbers for fields the schema treats as opaque decimal
/// strings - and the result is re-validated against the registry, since the
/// remote is not trusted to honor the required-field contract.
pub fn command_from_args(args: &Value) -> ChainPilotResult<AgentCommand> {
    let object = args
        .as_object()
        .ok_or_else(|| ChainPilotError::validation("Tool call arguments are not an object"))?;

    let kind = object
        .get("kind")
        .and_then(Value::as_str)
        .ok_or_else(|| ChainPilotError::validation("Tool call is missing the 'kind' field"))?
        .parse()
        .map_err(|e: ChainPilotError| ChainPilotError::validation(e.to_string()))?;

    let mut fields = BTreeMap::new();
    for (name, value) in object {
        if name == "kind" {
            continue;
        }
        let coerced = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            // Nulls and nested structures have no string form worth keeping.
            _ => continue,
        };
        fields.insert(name.clone(), coerced);
    }

    AgentCommand::from_fields(kind, &fields)
}
