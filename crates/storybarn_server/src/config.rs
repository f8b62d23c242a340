//! Service configuration.
//!
//! Layered loading: bundled defaults (compiled in), then an optional
//! `storybarn.toml` next to the working directory, then `STORYBARN__*`
//! environment variables. Later layers win. API keys are never part of the
//! config file; provider clients read them from the environment.

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use storybarn_error::{ConfigError, StorybarnResult};
use tracing::debug;

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../storybarn.toml");

/// Listen address settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
}

/// Provider model selection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProvidersConfig {
    /// Chat-completions model for story generation and analysis
    pub chat_model: String,
    /// Image-generations model for illustrations
    pub image_model: String,
    /// Per-call deadline for provider requests
    pub timeout_secs: u64,
}

/// Image storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Upload root directory; also served at `/uploads`
    pub upload_dir: String,
}

/// The full service configuration.
///
/// # Examples
///
/// ```
/// use storybarn_server::StorybarnConfig;
///
/// let config = StorybarnConfig::load().unwrap();
/// assert!(!config.providers.chat_model.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorybarnConfig {
    /// Listen address
    pub server: ServerConfig,
    /// Provider models
    pub providers: ProvidersConfig,
    /// Image storage
    pub storage: StorageConfig,
}

impl StorybarnConfig {
    /// Load configuration from defaults, file overrides, and environment.
    pub fn load() -> StorybarnResult<Self> {
        let config = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::with_name("storybarn").required(false))
            .add_source(Environment::with_prefix("STORYBARN").separator("__"))
            .build()
            .map_err(|e| ConfigError::new(e.to_string()))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| ConfigError::new(e.to_string()))?;

        debug!(
            host = %loaded.server.host,
            port = loaded.server.port,
            chat_model = %loaded.providers.chat_model,
            "Loaded configuration"
        );
        Ok(loaded)
    }

    /// The socket address string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
