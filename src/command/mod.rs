// Command model - the closed set of agent command variants and their fields
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ChainPilotError, ChainPilotResult};

pub mod form;
pub mod registry;

pub use form::CommandForm;
pub use registry::{FieldSpec, ValueType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandKind {
    CreateErc20Token,
    MintErc20,
    MintErc721,
    TransferErc20,
    TransferNative,
    SwapTokens,
    SwapToEthAndTransfer,
    GetAgentAddress,
}

impl CommandKind {
    pub const ALL: [CommandKind; 8] = [
        CommandKind::CreateErc20Token,
        CommandKind::MintErc20,
        CommandKind::MintErc721,
        CommandKind::TransferErc20,
        CommandKind::TransferNative,
        CommandKind::SwapTokens,
        CommandKind::SwapToEthAndTransfer,
        CommandKind::GetAgentAddress,
    ];

    /// Name used on every wire surface: the tool schema, the agent boundary
    /// and the HTTP API.
    pub fn wire_name(&self) -> &'static str {
        match self {
            CommandKind::CreateErc20Token => "CREATE_ERC20_TOKEN",
            CommandKind::MintErc20 => "MINT_ERC20",
            CommandKind::MintErc721 => "MINT_ERC721",
            CommandKind::TransferErc20 => "TRANSFER_ERC20",
            CommandKind::TransferNative => "TRANSFER_NATIVE",
            CommandKind::SwapTokens => "SWAP_TOKENS",
            CommandKind::SwapToEthAndTransfer => "SWAP_TO_ETH_AND_TRANSFER",
            CommandKind::GetAgentAddress => "GET_AGENT_ADDRESS",
        }
    }

    /// Human label shown in command pickers.
    pub fn label(&self) -> String {
        self.wire_name().replace('_', " ")
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl std::str::FromStr for CommandKind {
    type Err = ChainPilotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_uppercase();
        CommandKind::ALL
            .into_iter()
            .find(|kind| kind.wire_name() == normalized)
            .ok_or_else(|| ChainPilotError::invalid_input(format!("Unknown command kind: {}", s)))
    }
}

/// A structured instruction for the execution agent. The `kind` tag uniquely
/// determines the legal field set; a variant can never carry another
/// variant's fields. All chain scalars (amounts, supplies, decimals, gas)
/// are opaque decimal strings to avoid float rounding of token amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum AgentCommand {
    CreateErc20Token {
        name: String,
        symbol: String,
        initial_supply: String,
        decimals: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        purpose: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        gas_limit: Option<String>,
    },
    MintErc20 {
        to: String,
        amount: String,
        token_address: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        purpose: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        gas_limit: Option<String>,
    },
    MintErc721 {
        to: String,
        token_uri: String,
        token_address: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        purpose: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        gas_limit: Option<String>,
    },
    TransferErc20 {
        to: String,
        amount: String,
        token_address: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        purpose: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        gas_limit: Option<String>,
    },
    TransferNative {
        to: String,
        amount: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        purpose: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        gas_limit: Option<String>,
    },
    SwapTokens {
        token_in: String,
        token_out: String,
        amount_in: String,
        min_out: String,
        recipient: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        purpose: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        gas_limit: Option<String>,
    },
    SwapToEthAndTransfer {
        token_in: String,
        amount_in: String,
        min_eth_out: String,
        recipient: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        purpose: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        gas_limit: Option<String>,
    },
    GetAgentAddress,
}

impl AgentCommand {
    pub fn kind(&self) -> CommandKind {
        match self {
            AgentCommand::CreateErc20Token { .. } => CommandKind::CreateErc20Token,
            AgentCommand::MintErc20 { .. } => CommandKind::MintErc20,
            AgentCommand::MintErc721 { .. } => CommandKind::MintErc721,
            AgentCommand::TransferErc20 { .. } => CommandKind::TransferErc20,
            AgentCommand::TransferNative { .. } => CommandKind::TransferNative,
            AgentCommand::SwapTokens { .. } => CommandKind::SwapTokens,
            AgentCommand::SwapToEthAndTransfer { .. } => CommandKind::SwapToEthAndTransfer,
            AgentCommand::GetAgentAddress => CommandKind::GetAgentAddress,
        }
    }

    /// One-line description used as the user-side conversation entry when a
    /// command is submitted directly instead of through chat.
    pub fn summary(&self) -> String {
        match self {
            AgentCommand::CreateErc20Token { name, symbol, .. } => {
                format!("Create ERC20 token '{}' ({})", name, symbol)
            }
            AgentCommand::MintErc20 { to, amount, .. } => {
                format!("Mint {} ERC20 tokens to {}", amount, to)
            }
            AgentCommand::MintErc721 { to, .. } => format!("Mint ERC721 token to {}", to),
            AgentCommand::TransferErc20 { to, amount, .. } => {
                format!("Transfer {} ERC20 tokens to {}", amount, to)
            }
            AgentCommand::TransferNative { to, amount, .. } => {
                format!("Transfer {} wei to {}", amount, to)
            }
            AgentCommand::SwapTokens { token_in, token_out, amount_in, .. } => {
                format!("Swap {} of {} for {}", amount_in, token_in, token_out)
            }
            AgentCommand::SwapToEthAndTransfer { token_in, amount_in, recipient, .. } => {
                format!("Swap {} of {} to ETH for {}", amount_in, token_in, recipient)
            }
            AgentCommand::GetAgentAddress => "Get agent address".to_string(),
        }
    }

    /// Build a command of `kind` from raw field values keyed by wire name.
    ///
    /// Requiredness and defaults come from the schema registry, so this is
    /// the single validation path for both the manual form and resolver
    /// replies. Blank and whitespace-only values count as missing; fields
    /// the registry does not declare for `kind` are ignored, which is what
    /// keeps stale or cross-variant fields out of the built command.
    pub fn from_fields(
        kind: CommandKind,
        fields: &BTreeMap<String, String>,
    ) -> ChainPilotResult<AgentCommand> {
        let mut resolved: BTreeMap<&'static str, String> = BTreeMap::new();
        for spec in registry::fields(kind) {
            let value = fields
                .get(spec.name)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty());
            match value {
                Some(v) => {
                    resolved.insert(spec.name, v.to_string());
                }
                None if !spec.default.is_empty() => {
                    resolved.insert(spec.name, spec.default.to_string());
                }
                None if spec.required => {
                    return Err(ChainPilotError::validation(format!(
                        "Required field '{}' is empty for {}",
                        spec.name, kind
                    )));
                }
                None => {}
            }
        }

        let take = |name: &str| resolved.get(name).cloned().unwrap_or_default();
        let take_opt = |name: &str| resolved.get(name).cloned();

        Ok(match kind {
            CommandKind::CreateErc20Token => AgentCommand::CreateErc20Token {
                name: take("name"),
                symbol: take("symbol"),
                initial_supply: take("initialSupply"),
                decimals: take("decimals"),
                purpose: take_opt("purpose"),
                gas_limit: take_opt("gasLimit"),
            },
            CommandKind::MintErc20 => AgentCommand::MintErc20 {
                to: take("to"),
                amount: take("amount"),
                token_address: take("tokenAddress"),
                purpose: take_opt("purpose"),
                gas_limit: take_opt("gasLimit"),
            },
            CommandKind::MintErc721 => AgentCommand::MintErc721 {
                to: take("to"),
                token_uri: take("tokenUri"),
                token_address: take("tokenAddress"),
                purpose: take_opt("purpose"),
                gas_limit: take_opt("gasLimit"),
            },
            CommandKind::TransferErc20 => AgentCommand::TransferErc20 {
                to: take("to"),
                amount: take("amount"),
                token_address: take("tokenAddress"),
                purpose: take_opt("purpose"),
                gas_limit: take_opt("gasLimit"),
            },
            CommandKind::TransferNative => AgentCommand::TransferNative {
                to: take("to"),
                amount: take("amount"),
                purpose: take_opt("purpose"),
                gas_limit: take_opt("gasLimit"),
            },
            CommandKind::SwapTokens => AgentCommand::SwapTokens {
                token_in: take("tokenIn"),
                token_out: take("tokenOut"),
                amount_in: take("amountIn"),
                min_out: take("minOut"),
                recipient: take("recipient"),
                purpose: take_opt("purpose"),
                gas_limit: take_opt("gasLimit"),
            },
            CommandKind::SwapToEthAndTransfer => AgentCommand::SwapToEthAndTransfer {
                token_in: take("tokenIn"),
                amount_in: take("amountIn"),
                min_eth_out: take("minEthOut"),
                recipient: take("recipient"),
                purpose: take_opt("purpose"),
                gas_limit: take_opt("gasLimit"),
            },
            CommandKind::GetAgentAddress => AgentCommand::GetAgentAddress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_wire_names_round_trip() {
        for kind in CommandKind::ALL {
            let parsed: CommandKind = kind.wire_name().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn serde_names_agree_with_wire_names() {
        for kind in CommandKind::ALL {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.wire_name());
        }
    }

    #[test]
    fn kind_parse_is_forgiving_about_case_and_dashes() {
        let parsed: CommandKind = "transfer-native".parse().unwrap();
        assert_eq!(parsed, CommandKind::TransferNative);
        assert!("TELEPORT_TOKENS".parse::<CommandKind>().is_err());
    }

    #[test]
    fn command_serializes_with_wire_tag_and_camel_case_fields() {
        let cmd = AgentCommand::TransferNative {
            to: "0xabc".to_string(),
            amount: "10000000000000000".to_string(),
            purpose: None,
            gas_limit: Some("21000".to_string()),
        };
        let value = serde_json::to_value(&cmd).unwrap();
        assert_eq!(value["kind"], "TRANSFER_NATIVE");
        assert_eq!(value["to"], "0xabc");
        assert_eq!(value["gasLimit"], "21000");
        // Absent optionals stay off the wire entirely.
        assert!(value.get("purpose").is_none());
    }

    #[test]
    fn command_deserializes_from_wire_form() {
        let cmd: AgentCommand = serde_json::from_str(
            r#"{"kind":"MINT_ERC20","to":"0x1","amount":"5","tokenAddress":"0x2"}"#,
        )
        .unwrap();
        assert_eq!(cmd.kind(), CommandKind::MintErc20);
    }

    #[test]
    fn from_fields_applies_registry_defaults() {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), "SuperCoin".to_string());
        fields.insert("symbol".to_string(), "SPC".to_string());
        fields.insert("initialSupply".to_string(), "1000".to_string());
        let cmd = AgentCommand::from_fields(CommandKind::CreateErc20Token, &fields).unwrap();
        match cmd {
            AgentCommand::CreateErc20Token { decimals, .. } => assert_eq!(decimals, "18"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn from_fields_rejects_blank_required_field() {
        let mut fields = BTreeMap::new();
        fields.insert("to".to_string(), "0x1".to_string());
        fields.insert("amount".to_string(), "   ".to_string());
        let err = AgentCommand::from_fields(CommandKind::TransferNative, &fields).unwrap_err();
        assert!(matches!(err, ChainPilotError::Validation(_)));
        assert!(err.to_string().contains("amount"));
    }

    #[test]
    fn from_fields_ignores_fields_from_other_variants() {
        let mut fields = BTreeMap::new();
        fields.insert("to".to_string(), "0x1".to_string());
        fields.insert("amount".to_string(), "5".to_string());
        fields.insert("tokenUri".to_string(), "ipfs://stale".to_string());
        let cmd = AgentCommand::from_fields(CommandKind::TransferNative, &fields).unwrap();
        let value = serde_json::to_value(&cmd).unwrap();
        assert!(value.get("tokenUri").is_none());
    }
}
