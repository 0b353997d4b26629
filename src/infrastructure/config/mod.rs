use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::error::{AppError, Result};
use crate::infrastructure::security::keyring::ApiKeyStore;

pub const CONFIG_FILE: &str = "skumerge.toml";
pub const ENV_PREFIX: &str = "SKUMERGE_";
pub const DEFAULT_UPSTREAM_URL: &str = "https://goodday-app-prod.uc.r.appspot.com/api/items/move";

const KEYRING_SERVICE: &str = "SkuMergeRelay";
const KEYRING_ACCOUNT: &str = "goodday";

/// Runtime settings for the relay and the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    pub host: String,

    #[validate(range(min = 1))]
    pub port: u16,

    /// Full URL of the upstream items-move endpoint
    #[validate(url)]
    pub upstream_url: String,

    #[validate(range(min = 1))]
    pub upstream_timeout_secs: u64,

    /// Key used by `send` when no flag is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Entries kept in the relay's in-memory log
    #[validate(range(min = 1))]
    pub log_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            upstream_timeout_secs: 30,
            api_key: None,
            log_capacity: 100,
        }
    }
}

impl AppConfig {
    /// Defaults, then `skumerge.toml`, then `PORT`, then `SKUMERGE_*`.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::raw().only(&["PORT"]))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: AppConfig = figment
            .extract()
            .map_err(|e| AppError::ConfigError(format!("Failed to load settings: {}", e)))?;
        config
            .validate()
            .map_err(|e| AppError::ConfigError(format!("Invalid settings: {}", e)))?;
        Ok(config)
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

pub struct ConfigService {
    keyring: ApiKeyStore,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            keyring: ApiKeyStore::new(KEYRING_SERVICE, KEYRING_ACCOUNT),
        }
    }

    /// Load settings, reading a `.env` file first when one exists.
    pub fn load(&self) -> Result<AppConfig> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }
        AppConfig::from_figment(AppConfig::figment())
    }

    pub fn save_api_key(&self, key: &str) -> Result<()> {
        self.keyring.save(key)
    }

    pub fn get_api_key(&self) -> Result<Option<String>> {
        self.keyring.load()
    }

    pub fn delete_api_key(&self) -> Result<()> {
        self.keyring.delete()
    }

    /// Pick the API key for an upstream call: explicit flag, then settings,
    /// then the keyring. Blank values are skipped.
    pub fn resolve_api_key(&self, flag: Option<&str>, config: &AppConfig) -> Result<Option<String>> {
        let explicit = [flag, config.api_key.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|key| !key.is_empty());
        if let Some(key) = explicit {
            return Ok(Some(key.to_string()));
        }

        Ok(self
            .get_api_key()?
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty()))
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
