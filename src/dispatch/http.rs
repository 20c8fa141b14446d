use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use crate::auth::{HmacSecret, SIGNATURE_HEADER};
use crate::command::AgentCommand;

use super::{ExecutionAgent, Outcome};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const DISPATCH_FAILED: &str = "Agent failed to execute command.";

/// Dispatch client for a real execution agent reached over HTTP.
///
/// The serialized command is POSTed to the agent endpoint with an
/// `X-Signature: sha256=<hex>` HMAC over the exact request body. The agent
/// performs address/amount validation, signing and broadcast; this client
/// only fixes the request/response contract and the bounded timeout.
pub struct HttpExecutionAgent {
    client: Client,
    endpoint: String,
    secret: HmacSecret,
}

impl HttpExecutionAgent {
    pub fn new(endpoint: impl Into<String>, secret: HmacSecret) -> Self {
        Self::with_timeout(endpoint, secret, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        secret: HmacSecret,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            endpoint: endpoint.into(),
            secret,
        }
    }

    async fn send(&self, command: &AgentCommand) -> Result<Outcome, String> {
        let body = serde_json::to_string(command).map_err(|e| e.to_string())?;
        let signature = self.secret.sign(body.as_bytes());

        debug!("Dispatching {} to {}", command.kind(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header(SIGNATURE_HEADER, signature)
            .body(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!("Agent returned {}: {}", status, text));
        }

        let outcome: Outcome = response.json().await.map_err(|e| e.to_string())?;
        Ok(outcome.normalized())
    }
}

#[async_trait]
impl ExecutionAgent for HttpExecutionAgent {
    async fn dispatch(&self, command: &AgentCommand) -> Outcome {
        match self.send(command).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Dispatch to execution agent failed: {}", e);
                Outcome::failure(DISPATCH_FAILED, e)
            }
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}
