//! Configuration for talking to the monday.com API

use crate::common::EnvLoader;
use crate::{MondayError, Result};
use std::time::Duration;
use url::Url;

/// Prefix of every environment variable read by [`MondayConfig::from_env`]
pub const ENV_PREFIX: &str = "MONDAY";

/// Default GraphQL endpoint
pub const DEFAULT_API_URL: &str = "https://api.monday.com/v2";

/// Default HTTP timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the GraphQL backend
#[derive(Clone)]
pub struct MondayConfig {
    /// API token sent in the `Authorization` header
    pub api_token: String,
    /// GraphQL endpoint
    pub api_url: Url,
    /// Value of the `API-Version` header, if pinned
    pub api_version: Option<String>,
    /// Per-request timeout enforced by the HTTP client
    pub request_timeout: Duration,
}

impl std::fmt::Debug for MondayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MondayConfig")
            .field("api_token", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .field("api_version", &self.api_version)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl MondayConfig {
    /// Create a config for `api_token` with default endpoint and timeout
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(MondayError::Config("API token cannot be empty".to_string()));
        }

        Ok(Self {
            api_token,
            api_url: parse_api_url(DEFAULT_API_URL)?,
            api_version: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        })
    }

    /// Load configuration from `MONDAY_*` environment variables
    ///
    /// `MONDAY_API_TOKEN` is required; `MONDAY_API_URL`, `MONDAY_API_VERSION`
    /// and `MONDAY_REQUEST_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self> {
        let loader = EnvLoader::new(ENV_PREFIX);

        let api_token: String = loader.load_optional("API_TOKEN").ok_or_else(|| {
            MondayError::Config(format!("{} is not set", loader.key("API_TOKEN")))
        })?;

        let mut config = Self::new(api_token)?;
        config.api_url = parse_api_url(&loader.load_string("API_URL", DEFAULT_API_URL))?;
        config.api_version = loader.load_optional("API_VERSION");
        config.request_timeout = Duration::from_secs(loader.load_validated(
            "REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
            |secs| *secs > 0,
        ));

        tracing::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Override the endpoint
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self> {
        self.api_url = parse_api_url(api_url)?;
        Ok(self)
    }

    /// Pin the `API-Version` header
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }
}

fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| MondayError::Config(format!("Invalid API URL '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(MondayError::Config(format!(
            "Invalid API URL '{raw}': unsupported scheme '{other}'"
        ))),
    }
}
