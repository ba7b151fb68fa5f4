use secrecy::{ExposeSecret, Secret};
use std::env;

/// Exchange connection settings. The API key is optional: every endpoint in
/// this crate is public, but Binance serves higher request weights to keyed
/// calls.
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    api_key: Option<Secret<String>>,
    pub testnet: bool,
    pub base_url: Option<String>,
}

impl ExchangeConfig {
    /// Create a configuration with an API key
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            api_key: Some(Secret::new(api_key)),
            testnet: false,
            base_url: None,
        }
    }

    /// Create configuration for public, unkeyed access
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            api_key: None,
            testnet: false,
            base_url: None,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{EXCHANGE}_API_KEY` (optional, e.g. `BINANCE_API_KEY`)
    /// - `{EXCHANGE}_TESTNET` (optional, defaults to false)
    /// - `{EXCHANGE}_BASE_URL` (optional)
    pub fn from_env(exchange_prefix: &str) -> Result<Self, ConfigError> {
        let prefix = exchange_prefix.to_uppercase();

        let api_key = env::var(format!("{}_API_KEY", prefix)).ok().map(Secret::new);

        let testnet = env::var(format!("{}_TESTNET", prefix))
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);

        let base_url = env::var(format!("{}_BASE_URL", prefix)).ok();

        Ok(Self {
            api_key,
            testnet,
            base_url,
        })
    }

    /// Create configuration from a .env file and environment variables
    ///
    /// Loads the .env file first (if it exists), then reads the standard
    /// environment variable names.
    #[cfg(feature = "env-file")]
    pub fn from_env_file(exchange_prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(exchange_prefix, ".env")
    }

    /// Create configuration from a specific .env file path
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(
        exchange_prefix: &str,
        env_file_path: &str,
    ) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(_) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                // No .env file, continue with system env vars
            }
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(exchange_prefix)
    }

    /// Set testnet mode
    #[must_use]
    pub fn testnet(mut self, testnet: bool) -> Self {
        self.testnet = testnet;
        self
    }

    /// Set custom base URL
    #[must_use]
    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Check whether an API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Get the API key (use carefully - exposes the secret)
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret().as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
