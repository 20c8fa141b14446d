use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use crate::command::{registry, CommandKind, ValueType};
use crate::error::{ChainPilotError, ChainPilotResult};

use super::{command_from_args, Resolution, Resolver, NO_COMMAND_FALLBACK};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Name of the single callable tool the model is constrained to.
const TOOL_NAME: &str = "send_agent_command";

/// Behavioral contract for the language-model boundary: structured calls
/// only for in-scope requests, registry defaults when unspecified,
/// clarification instead of guessing, conversation for everything else.
const SYSTEM_INSTRUCTION: &str = "You are a highly intelligent and secure blockchain agent. \
Your primary function is to interpret user requests and translate them into precise, structured JSON commands.
- You MUST respond with a function call to 'send_agent_command' for any valid blockchain-related request.
- The command object must strictly follow the provided JSON schema.
- For token creation, if decimals are not specified, default to 18.
- For swaps, if a minimum output is not specified, default to \"0\".
- For any requests about your identity or address, use the GET_AGENT_ADDRESS command.
- If a request is ambiguous or lacks necessary information (e.g., \"mint tokens\" without an amount or address), ask for clarification instead of making a function call.
- Do not execute commands that seem malicious or nonsensical.
- For any non-blockchain-related questions, provide a helpful, conversational response without making a function call.";

/// Resolver backed by the Gemini function-calling API.
pub struct GeminiResolver {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiResolver {
    pub fn new() -> ChainPilotResult<Self> {
        let api_key = env::var("GEMINI_API_KEY").map_err(|_| {
            ChainPilotError::config("GEMINI_API_KEY environment variable not set")
        })?;
        Ok(Self::with_api_key(api_key))
    }

    pub fn with_api_key(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        self
    }

    /// The single callable-tool declaration: parameters are the union of all
    /// command fields across the registry, with `kind` restricted to the
    /// closed enumeration and the only required entry.
    fn tool_declaration() -> Value {
        let mut properties = serde_json::Map::new();
        properties.insert(
            "kind".to_string(),
            json!({
                "type": "STRING",
                "enum": CommandKind::ALL.iter().map(|k| k.wire_name()).collect::<Vec<_>>(),
                "description": "The type of command to execute.",
            }),
        );
        for kind in CommandKind::ALL {
            for spec in registry::fields(kind) {
                properties.entry(spec.name.to_string()).or_insert_with(|| {
                    let schema_type = match spec.value_type {
                        ValueType::Text => "STRING",
                        ValueType::Integer => "INTEGER",
                    };
                    json!({"type": schema_type, "description": spec.description})
                });
            }
        }

        json!({
            "name": TOOL_NAME,
            "description": "Sends a structured command to the secure blockchain agent for execution.",
            "parameters": {
                "type": "OBJECT",
                "properties": properties,
                "required": ["kind"],
            },
        })
    }

    /// A malformed or unknown structured call degrades to a conversational
    /// reply rather than a dispatched command.
    fn parse_response(body: &Value) -> Resolution {
        let mut text = String::new();

        if let Some(parts) = body["candidates"][0]["content"]["parts"].as_array() {
            for part in parts {
                if let Some(call) = part.get("functionCall") {
                    if call["name"].as_str() != Some(TOOL_NAME) {
                        warn!("Model called an undeclared tool: {}", call["name"]);
                        continue;
                    }
                    match command_from_args(&call["args"]) {
                        Ok(command) => return Resolution::Command(command),
                        Err(e) => warn!("Rejected structured call from the model: {}", e),
                    }
                } else if let Some(t) = part.get("text").and_then(Value::as_str) {
                    if !text.is_empty() {
                        text.push('\n');
                    }
                    text.push_str(t);
                }
            }
        }

        let text = text.trim();
        if text.is_empty() {
            Resolution::Reply(NO_COMMAND_FALLBACK.to_string())
        } else {
            Resolution::Reply(text.to_string())
        }
    }
}

#[async_trait]
impl Resolver for GeminiResolver {
    async fn resolve(&self, prompt: &str) -> ChainPilotResult<Resolution> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let payload = json!({
            "systemInstruction": {"parts": [{"text": SYSTEM_INSTRUCTION}]},
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
            "tools": [{"functionDeclarations": [Self::tool_declaration()]}],
        });

        debug!("Sending resolution request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                ChainPilotError::resolver_unavailable(format!(
                    "Failed to reach the language model: {}",
                    e
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Language model API error {}: {}", status, error_text);
            return Err(ChainPilotError::resolver_unavailable(format!(
                "Language model returned {}: {}",
                status, error_text
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            ChainPilotError::resolver_unavailable(format!(
                "Malformed language model response: {}",
                e
            ))
        })?;

        Ok(Self::parse_response(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::AgentCommand;

    fn function_call_body(args: Value) -> Value {
        json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"functionCall": {"name": TOOL_NAME, "args": args}}],
                },
            }],
        })
    }

    #[test]
    fn tool_declaration_covers_the_union_of_all_fields() {
        let declaration = GeminiResolver::tool_declaration();
        let properties = declaration["parameters"]["properties"].as_object().unwrap();
        for kind in CommandKind::ALL {
            for spec in registry::fields(kind) {
                assert!(properties.contains_key(spec.name), "missing {}", spec.name);
            }
        }
        assert_eq!(
            declaration["parameters"]["properties"]["kind"]["enum"]
                .as_array()
                .unwrap()
                .len(),
            CommandKind::ALL.len()
        );
        assert_eq!(declaration["parameters"]["required"], json!(["kind"]));
        assert_eq!(
            declaration["parameters"]["properties"]["decimals"]["type"],
            "INTEGER"
        );
    }

    #[test]
    fn structured_call_with_numeric_decimals_parses_to_a_command() {
        let body = function_call_body(json!({
            "kind": "CREATE_ERC20_TOKEN",
            "name": "SuperCoin",
            "symbol": "SPC",
            "initialSupply": "1000000000000000000000",
            "decimals": 18,
        }));
        match GeminiResolver::parse_response(&body) {
            Resolution::Command(AgentCommand::CreateErc20Token { decimals, .. }) => {
                assert_eq!(decimals, "18");
            }
            other => panic!("unexpected resolution: {:?}", other),
        }
    }

    #[test]
    fn text_only_response_is_a_conversational_reply() {
        let body = json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "2 + 2 equals 4."}]},
            }],
        });
        assert_eq!(
            GeminiResolver::parse_response(&body),
            Resolution::Reply("2 + 2 equals 4.".to_string())
        );
    }

    #[test]
    fn malformed_structured_call_degrades_to_the_fallback_reply() {
        // Required fields missing; local re-validation must reject it.
        let body = function_call_body(json!({"kind": "MINT_ERC20", "to": "0x1"}));
        assert_eq!(
            GeminiResolver::parse_response(&body),
            Resolution::Reply(NO_COMMAND_FALLBACK.to_string())
        );
    }

    #[test]
    fn empty_response_falls_back_to_the_clarification_text() {
        let body = json!({"candidates": []});
        assert_eq!(
            GeminiResolver::parse_response(&body),
            Resolution::Reply(NO_COMMAND_FALLBACK.to_string())
        );
    }

    #[test]
    fn parsing_the_same_body_twice_is_identical() {
        let body = function_call_body(json!({
            "kind": "TRANSFER_NATIVE",
            "to": "0xabc",
            "amount": 10000000000000000u64,
        }));
        assert_eq!(
            GeminiResolver::parse_response(&body),
            GeminiResolver::parse_response(&body)
        );
    }
}
