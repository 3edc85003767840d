//! Provider configuration: where the Grantly API lives and how to
//! authenticate against it.

use grantly_client::GrantlyClient;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Default public API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.grantly.io/";

const ENV_ENDPOINT: &str = "GRANTLY_ENDPOINT";
const ENV_API_TOKEN: &str = "GRANTLY_API_TOKEN";

/// Errors raised while assembling provider configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing API token: set the api_token attribute or the {ENV_API_TOKEN} environment variable")]
    MissingToken,

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Configuration supplied by the host, with environment fallbacks.
#[derive(Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("endpoint", &self.endpoint)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ProviderConfig {
    /// Fill unset fields from the environment (`.env` honored when present).
    pub fn with_env_fallback(mut self) -> Self {
        let _ = dotenvy::dotenv();
        if self.endpoint.is_none() {
            self.endpoint = std::env::var(ENV_ENDPOINT).ok();
        }
        if self.api_token.is_none() {
            self.api_token = std::env::var(ENV_API_TOKEN).ok();
        }
        self
    }

    /// Build the shared client handle, failing fast on bad configuration.
    pub fn client(&self) -> Result<GrantlyClient, ConfigError> {
        let token = self
            .api_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;
        let endpoint = self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        GrantlyClient::new(endpoint, token)
            .map_err(|e| ConfigError::InvalidEndpoint(e.to_string()))
    }
}
