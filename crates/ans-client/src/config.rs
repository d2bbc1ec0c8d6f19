//! ANS Client Configuration
//!
//! Configuration types for the expense API gateway.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default API base path.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "ANS_API_URL";

// =============================================================================
// Client Configuration
// =============================================================================

/// Complete gateway configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: TimeoutConfig,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: TimeoutConfig::default(),
            user_agent: format!("ans-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a configuration pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Build from the environment, falling back to the default base URL.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    /// Set connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.timeout.connect = timeout;
        self
    }

    /// Set request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.timeout.request = timeout;
        self
    }

    /// Parse the base URL, normalised to end with a slash so relative
    /// joins keep the `/api` prefix.
    pub fn parsed_base_url(&self) -> Result<Url, ClientError> {
        let trimmed = self.base_url.trim();
        if trimmed.is_empty() {
            return Err(ClientError::InvalidConfig("base_url is empty".to_string()));
        }

        let mut url = Url::parse(trimmed)?;
        if url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                trimmed
            )));
        }
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "unsupported scheme: {}",
                url.scheme()
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ClientError> {
        self.parsed_base_url()?;
        if self.timeout.request.is_zero() {
            return Err(ClientError::InvalidConfig(
                "request timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Timeout Configuration
// =============================================================================

/// Transport timeouts. The dashboard itself never models timeouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            request: Duration::from_secs(30),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/api");
        assert_eq!(config.timeout.request, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let url = ClientConfig::default().parsed_base_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/");
        assert_eq!(
            url.join("estatisticas").unwrap().as_str(),
            "http://localhost:8000/api/estatisticas"
        );
    }

    #[test]
    fn test_invalid_base_urls() {
        assert!(ClientConfig::new("").validate().is_err());
        assert!(ClientConfig::new("not a url").validate().is_err());
        assert!(matches!(
            ClientConfig::new("ftp://host/api").validate(),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_zero_request_timeout_rejected() {
        let config = ClientConfig::default().with_request_timeout(Duration::ZERO);
        assert!(matches!(
            config.validate(),
            Err(ClientError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_env() {
        std::env::set_var(BASE_URL_ENV, " https://ans.example.com/api ");
        assert_eq!(ClientConfig::from_env().base_url, "https://ans.example.com/api");

        std::env::set_var(BASE_URL_ENV, "  ");
        assert_eq!(ClientConfig::from_env().base_url, DEFAULT_BASE_URL);

        std::env::remove_var(BASE_URL_ENV);
        assert_eq!(ClientConfig::from_env(), ClientConfig::default());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = ClientConfig::new("https://ans.example.com/api")
            .with_connect_timeout(Duration::from_secs(2));
        let json = serde_json::to_string(&config).unwrap();
        let back: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
