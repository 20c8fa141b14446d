//! Mock execution agent.
//!
//! Stands in for the signing/broadcast backend during development: fixed
//! artificial latency, fabricated transaction hashes and a well-known agent
//! address. Only the response contract matters; a real deployment swaps in
//! [`super::HttpExecutionAgent`] without touching any caller.

use std::time::Duration;

use async_trait::async_trait;
use rand::RngCore;

use crate::command::AgentCommand;

use super::{ExecutionAgent, Outcome};

/// Well-known address the mock reports for the agent wallet.
pub const MOCK_AGENT_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

pub struct MockExecutionAgent {
    latency: Duration,
}

impl MockExecutionAgent {
    pub fn new() -> Self {
        Self::with_latency(DEFAULT_LATENCY)
    }

    /// Zero latency is useful in tests.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for MockExecutionAgent {
    fn default() -> Self {
        Self::new()
    }
}

fn random_hex(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::thread_rng().fill_bytes(&mut buf);
    format!("0x{}", hex::encode(buf))
}

#[async_trait]
impl ExecutionAgent for MockExecutionAgent {
    async fn dispatch(&self, command: &AgentCommand) -> Outcome {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match command {
            AgentCommand::GetAgentAddress => {
                Outcome::success("Agent address retrieved successfully.")
                    .with_agent_address(MOCK_AGENT_ADDRESS)
            }
            AgentCommand::CreateErc20Token { name, symbol, .. } => {
                Outcome::success(format!(
                    "Successfully created token '{}' ({}).",
                    name, symbol
                ))
                .with_transaction_hash(random_hex(32))
                .with_contract_address(random_hex(20))
            }
            other => Outcome::success(format!(
                "Command '{}' executed successfully.",
                other.kind()
            ))
            .with_transaction_hash(random_hex(32)),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandKind;
    use std::collections::BTreeMap;

    fn instant_mock() -> MockExecutionAgent {
        MockExecutionAgent::with_latency(Duration::ZERO)
    }

    fn is_hex_with_len(value: &str, hex_chars: usize) -> bool {
        value.strip_prefix("0x").is_some_and(|rest| {
            rest.len() == hex_chars && rest.chars().all(|c| c.is_ascii_hexdigit())
        })
    }

    #[tokio::test]
    async fn address_lookup_returns_the_fixed_agent_address() {
        let outcome = instant_mock().dispatch(&AgentCommand::GetAgentAddress).await;
        assert!(outcome.success);
        assert_eq!(outcome.agent_address.as_deref(), Some(MOCK_AGENT_ADDRESS));
        assert!(outcome.transaction_hash.is_none());
    }

    #[tokio::test]
    async fn token_creation_fabricates_hash_and_contract_address() {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), "SuperCoin".to_string());
        fields.insert("symbol".to_string(), "SPC".to_string());
        fields.insert("initialSupply".to_string(), "1000".to_string());
        let cmd = AgentCommand::from_fields(CommandKind::CreateErc20Token, &fields).unwrap();

        let outcome = instant_mock().dispatch(&cmd).await;
        assert!(outcome.success);
        assert!(outcome.message.contains("SuperCoin"));
        assert!(is_hex_with_len(outcome.transaction_hash.as_deref().unwrap(), 64));
        assert!(is_hex_with_len(outcome.contract_address.as_deref().unwrap(), 40));
    }

    #[tokio::test]
    async fn other_commands_fabricate_a_transaction_hash_only() {
        let mut fields = BTreeMap::new();
        fields.insert("to".to_string(), "0xabc".to_string());
        fields.insert("amount".to_string(), "10000000000000000".to_string());
        let cmd = AgentCommand::from_fields(CommandKind::TransferNative, &fields).unwrap();

        let outcome = instant_mock().dispatch(&cmd).await;
        assert!(outcome.success);
        assert!(outcome.message.contains("TRANSFER_NATIVE"));
        assert!(is_hex_with_len(outcome.transaction_hash.as_deref().unwrap(), 64));
        assert!(outcome.contract_address.is_none());
        assert!(outcome.agent_address.is_none());
    }
}
