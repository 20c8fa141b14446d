// Configuration management - TOML file under the user config dir with
// environment overrides for the language-model credential
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use url::Url;

use crate::auth::HmacSecret;
use crate::error::{ChainPilotError, ChainPilotResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChainPilotConfig {
    #[serde(default)]
    pub resolver: ResolverSettings,
    #[serde(default)]
    pub agent: AgentSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolverSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Execution agent endpoint. When unset, commands go to the mock agent.
    pub endpoint: Option<String>,
    pub hmac_secret: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Artificial latency of the mock agent, for interactive realism.
    pub mock_latency_ms: Option<u64>,
}

impl AgentSettings {
    pub fn endpoint_url(&self) -> ChainPilotResult<Option<Url>> {
        match &self.endpoint {
            None => Ok(None),
            Some(raw) => Url::parse(raw)
                .map(Some)
                .map_err(|e| ChainPilotError::config(format!("Invalid agent endpoint '{}': {}", raw, e))),
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> ChainPilotResult<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| ChainPilotError::config("Could not determine the user config directory"))?;
        Ok(Self {
            path: dir.join("chainpilot").join("config.toml"),
        })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the config file, falling back to defaults when it does not
    /// exist. `GEMINI_API_KEY` overrides the stored resolver credential.
    pub fn load(&self) -> ChainPilotResult<ChainPilotConfig> {
        let mut config = if self.path.exists() {
            let raw = fs::read_to_string(&self.path)?;
            toml::from_str(&raw)
                .map_err(|e| ChainPilotError::config(format!("Malformed config file: {}", e)))?
        } else {
            ChainPilotConfig::default()
        };

        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            config.resolver.api_key = Some(key);
        }

        Ok(config)
    }

    pub fn save(&self, config: &ChainPilotConfig) -> ChainPilotResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(config)
            .map_err(|e| ChainPilotError::config(format!("Could not serialize config: {}", e)))?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Current signing secret, generating and persisting one on first use.
    pub fn ensure_secret(&self, config: &mut ChainPilotConfig) -> ChainPilotResult<HmacSecret> {
        if let Some(secret) = &config.agent.hmac_secret {
            return Ok(HmacSecret::new(secret.clone()));
        }
        let secret = HmacSecret::generate();
        config.agent.hmac_secret = Some(secret.reveal().to_string());
        self.save(config)?;
        Ok(secret)
    }

    /// Replace the signing secret with a freshly generated one.
    pub fn rotate_secret(&self, config: &mut ChainPilotConfig) -> ChainPilotResult<HmacSecret> {
        let secret = HmacSecret::generate();
        config.agent.hmac_secret = Some(secret.reveal().to_string());
        self.save(config)?;
        Ok(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager_in(dir: &TempDir) -> ConfigManager {
        ConfigManager::with_path(dir.path().join("config.toml"))
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let config = manager_in(&dir).load().unwrap();
        assert!(config.agent.endpoint.is_none());
        assert!(config.agent.hmac_secret.is_none());
    }

    #[test]
    fn save_and_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir);

        let mut config = ChainPilotConfig::default();
        config.resolver.model = Some("gemini-2.5-flash".to_string());
        config.agent.endpoint = Some("https://agent.example/api/commands".to_string());
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.resolver.model.as_deref(), Some("gemini-2.5-flash"));
        assert_eq!(
            loaded.agent.endpoint.as_deref(),
            Some("https://agent.example/api/commands")
        );
    }

    #[test]
    fn ensure_secret_generates_once_and_persists() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir);

        let mut config = manager.load().unwrap();
        let first = manager.ensure_secret(&mut config).unwrap();

        let mut reloaded = manager.load().unwrap();
        let second = manager.ensure_secret(&mut reloaded).unwrap();
        assert_eq!(first, second);

        let rotated = manager.rotate_secret(&mut reloaded).unwrap();
        assert_ne!(first, rotated);
    }

    #[test]
    fn bad_endpoint_is_a_config_error() {
        let settings = AgentSettings {
            endpoint: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            settings.endpoint_url(),
            Err(ChainPilotError::Config(_))
        ));

        let settings = AgentSettings::default();
        assert!(settings.endpoint_url().unwrap().is_none());
    }
}
