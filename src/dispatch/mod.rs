// Dispatch layer - submits validated commands to the execution agent and
// normalizes every result into a uniform outcome record
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::command::AgentCommand;

pub mod http;
pub mod mock;

pub use http::HttpExecutionAgent;
pub use mock::MockExecutionAgent;

/// Normalized result of attempting to execute a command.
///
/// Invariant: `success == false` implies `error` is present and all
/// chain-result fields are absent; `success == true` implies `error` is
/// absent. Use the constructors below rather than building the struct by
/// hand; remote responses go through [`Outcome::normalized`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Outcome {
            success: true,
            message: message.into(),
            transaction_hash: None,
            contract_address: None,
            agent_address: None,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        let message = message.into();
        let mut error = error.into();
        if error.is_empty() {
            error = message.clone();
        }
        Outcome {
            success: false,
            message,
            transaction_hash: None,
            contract_address: None,
            agent_address: None,
            error: Some(error),
        }
    }

    pub fn with_transaction_hash(mut self, hash: impl Into<String>) -> Self {
        self.transaction_hash = Some(hash.into());
        self
    }

    pub fn with_contract_address(mut self, address: impl Into<String>) -> Self {
        self.contract_address = Some(address.into());
        self
    }

    pub fn with_agent_address(mut self, address: impl Into<String>) -> Self {
        self.agent_address = Some(address.into());
        self
    }

    /// Re-establish the outcome invariant on a record parsed from a remote
    /// agent, which is not trusted to honor it.
    pub fn normalized(mut self) -> Self {
        if self.success {
            self.error = None;
        } else {
            if self.error.as_deref().is_none_or(str::is_empty) {
                self.error = Some(self.message.clone());
            }
            self.transaction_hash = None;
            self.contract_address = None;
            self.agent_address = None;
        }
        self
    }
}

/// The execution agent boundary. `dispatch` always resolves: transport
/// failures, timeouts and agent-reported failures all come back as a
/// `success == false` outcome, never as a thrown fault, so callers render
/// results without a parallel error path.
#[async_trait]
pub trait ExecutionAgent: Send + Sync {
    async fn dispatch(&self, command: &AgentCommand) -> Outcome;

    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_always_carries_an_error() {
        let outcome = Outcome::failure("Agent failed to execute command.", "");
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("Agent failed to execute command."));
    }

    #[test]
    fn success_never_carries_an_error() {
        let outcome = Outcome::success("ok").with_transaction_hash("0xabc");
        assert!(outcome.success);
        assert!(outcome.error.is_none());
    }

    #[test]
    fn normalizing_a_failed_remote_outcome_strips_chain_fields() {
        let raw: Outcome = serde_json::from_str(
            r#"{"success":false,"message":"reverted","transactionHash":"0xdead"}"#,
        )
        .unwrap();
        let outcome = raw.normalized();
        assert_eq!(outcome.error.as_deref(), Some("reverted"));
        assert!(outcome.transaction_hash.is_none());
    }

    #[test]
    fn normalizing_a_successful_remote_outcome_drops_stray_errors() {
        let raw: Outcome = serde_json::from_str(
            r#"{"success":true,"message":"done","transactionHash":"0x1","error":"ignored"}"#,
        )
        .unwrap();
        let outcome = raw.normalized();
        assert!(outcome.success);
        assert!(outcome.error.is_none());
        assert_eq!(outcome.transaction_hash.as_deref(), Some("0x1"));
    }

    #[test]
    fn outcome_uses_camel_case_on_the_wire() {
        let outcome = Outcome::success("ok")
            .with_transaction_hash("0x1")
            .with_contract_address("0x2");
        let value = serde_json::to_value(&outcome).unwrap();
        assert!(value.get("transactionHash").is_some());
        assert!(value.get("contractAddress").is_some());
        assert!(value.get("error").is_none());
    }
}
