use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{ChainPilotConfig, ConfigManager};
use crate::dispatch::{ExecutionAgent, HttpExecutionAgent, MockExecutionAgent, Outcome};
use crate::error::{ChainPilotError, ChainPilotResult};
use crate::resolver::{GeminiResolver, Resolution, Resolver};
use crate::session::Session;

pub mod address;
pub mod chat;
pub mod describe;
pub mod secret;
pub mod send;

/// Stands in when no language-model credential is configured: chat turns
/// surface the configuration problem as a conversational error entry
/// instead of aborting the whole session.
struct UnconfiguredResolver;

#[async_trait]
impl Resolver for UnconfiguredResolver {
    async fn resolve(&self, _prompt: &str) -> ChainPilotResult<Resolution> {
        Err(ChainPilotError::resolver_unavailable(
            "No language-model API key configured; set GEMINI_API_KEY or add it to the config file",
        ))
    }
}

pub(crate) fn build_session() -> ChainPilotResult<Session> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load()?;
    let resolver = resolver_from(&config);
    let agent = agent_from(&manager, &mut config)?;
    Ok(Session::new(resolver, agent))
}

fn resolver_from(config: &ChainPilotConfig) -> Arc<dyn Resolver> {
    let settings = &config.resolver;
    let Some(api_key) = settings.api_key.clone() else {
        return Arc::new(UnconfiguredResolver);
    };

    let mut resolver = GeminiResolver::with_api_key(api_key);
    if let Some(base_url) = &settings.base_url {
        resolver = resolver.with_base_url(base_url.clone());
    }
    if let Some(model) = &settings.model {
        resolver = resolver.with_model(model.clone());
    }
    if let Some(secs) = settings.timeout_secs {
        resolver = resolver.with_timeout(Duration::from_secs(secs));
    }
    Arc::new(resolver)
}

fn agent_from(
    manager: &ConfigManager,
    config: &mut ChainPilotConfig,
) -> ChainPilotResult<Arc<dyn ExecutionAgent>> {
    match config.agent.endpoint_url()? {
        Some(endpoint) => {
            let secret = manager.ensure_secret(config)?;
            let timeout = Duration::from_secs(config.agent.timeout_secs.unwrap_or(30));
            Ok(Arc::new(HttpExecutionAgent::with_timeout(
                endpoint.as_str(),
                secret,
                timeout,
            )))
        }
        None => {
            let latency = Duration::from_millis(config.agent.mock_latency_ms.unwrap_or(1500));
            Ok(Arc::new(MockExecutionAgent::with_latency(latency)))
        }
    }
}

pub(crate) fn print_outcome(outcome: &Outcome) {
    if outcome.success {
        println!("✅ {}", outcome.message);
    } else {
        println!("❌ {}", outcome.message);
    }
    if let Some(hash) = &outcome.transaction_hash {
        println!("   Transaction Hash: {}", hash);
    }
    if let Some(address) = &outcome.contract_address {
        println!("   Contract Address: {}", address);
    }
    if let Some(address) = &outcome.agent_address {
        println!("   Agent Address:    {}", address);
    }
    if let Some(error) = &outcome.error {
        println!("   Error: {}", error);
    }
}
