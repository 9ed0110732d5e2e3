use anyhow::{Context, Result};
use monday_mcp::MondayConfig;

use crate::cli::Cli;

/// Connection settings given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Replaces `MONDAY_API_URL`
    pub api_url: Option<String>,
    /// Replaces `MONDAY_API_VERSION`
    pub api_version: Option<String>,
}

impl ConfigOverrides {
    /// Overrides carried by the parsed command line
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            api_url: cli.api_url.clone(),
            api_version: cli.api_version.clone(),
        }
    }

    /// Load `MONDAY_*` configuration and apply the overrides
    pub fn load(&self) -> Result<MondayConfig> {
        let config = MondayConfig::from_env().context("Failed to load configuration")?;
        self.apply(config)
    }

    /// Apply the overrides to `config`
    pub fn apply(&self, mut config: MondayConfig) -> Result<MondayConfig> {
        if let Some(api_url) = &self.api_url {
            config = config
                .with_api_url(api_url)
                .context("Invalid --api-url")?;
        }
        if let Some(api_version) = &self.api_version {
            config = config.with_api_version(api_version.clone());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monday_mcp::MondayError;
    use serial_test::serial;

    #[test]
    fn test_overrides_replace_values() {
        let overrides = ConfigOverrides {
            api_url: Some("http://localhost:4000/graphql".to_string()),
            api_version: Some("2025-01".to_string()),
        };

        let config = overrides.apply(MondayConfig::new("token").unwrap()).unwrap();

        assert_eq!(config.api_url.as_str(), "http://localhost:4000/graphql");
        assert_eq!(config.api_version.as_deref(), Some("2025-01"));
    }

    #[test]
    fn test_invalid_url_override_is_config_error() {
        let overrides = ConfigOverrides {
            api_url: Some("ftp://nope".to_string()),
            api_version: None,
        };

        let err = overrides
            .apply(MondayConfig::new("token").unwrap())
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<MondayError>(),
            Some(MondayError::Config(_))
        ));
    }

    #[test]
    #[serial]
    fn test_missing_token_fails_to_load() {
        std::env::remove_var("MONDAY_API_TOKEN");

        let err = ConfigOverrides::default().load().unwrap_err();

        assert!(err.to_string().contains("Failed to load configuration"));
        assert!(err.downcast_ref::<MondayError>().is_some());
    }
}
