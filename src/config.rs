//! Centralized configuration management for conduit-editor

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Result, Context};

const DEFAULT_API_URL: &str = "https://api.realworld.io/api";
const DEFAULT_USER_FILE: &str = "./conduit_user.json";
const DEFAULT_LOG_FILE: &str = "conduit_editor.log";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Conduit API, without trailing slash
    pub api_url: String,
    /// JSON file holding the signed-in user
    pub user_file: PathBuf,
    /// Log file used while the terminal UI owns stdout
    pub log_file: PathBuf,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: "conduit-editor/0.1.0".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_file: DEFAULT_USER_FILE.into(),
            log_file: DEFAULT_LOG_FILE.into(),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var("CONDUIT_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let user_file = std::env::var("CONDUIT_USER_FILE")
            .unwrap_or_else(|_| DEFAULT_USER_FILE.to_string())
            .into();

        let log_file = std::env::var("CONDUIT_LOG_FILE")
            .unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string())
            .into();

        let http = HttpConfig {
            timeout_seconds: parse_env_var("CONDUIT_HTTP_TIMEOUT_SECONDS")?.unwrap_or(30),
            user_agent: std::env::var("CONDUIT_USER_AGENT")
                .unwrap_or_else(|_| "conduit-editor/0.1.0".to_string()),
        };

        Ok(Config {
            api_url: normalize_api_url(&api_url),
            user_file,
            log_file,
            http,
        })
    }

    /// Override the API base URL (e.g. from a command line flag)
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = normalize_api_url(api_url);
        self
    }

    /// Override the session file location
    pub fn with_user_file(mut self, user_file: impl Into<PathBuf>) -> Self {
        self.user_file = user_file.into();
        self
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "API URL must start with http:// or https://: {}",
                self.api_url
            ));
        }

        if self.http.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("HTTP timeout must be greater than zero"));
        }

        Ok(())
    }
}

fn normalize_api_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, "https://api.realworld.io/api");
        assert_eq!(config.user_file, PathBuf::from("./conduit_user.json"));
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_api_url_override_strips_trailing_slash() {
        let config = Config::default().with_api_url("http://localhost:3000/api/");
        assert_eq!(config.api_url, "http://localhost:3000/api");
    }

    #[test]
    fn test_config_validation() {
        Config::default().validate().unwrap();

        let bad_scheme = Config::default().with_api_url("localhost:3000");
        assert!(bad_scheme.validate().is_err());

        let mut zero_timeout = Config::default();
        zero_timeout.http.timeout_seconds = 0;
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_parse_env_var_reports_bad_values() {
        std::env::set_var("CONDUIT_TEST_BAD_NUMBER", "thirty");
        let parsed: Result<Option<u64>> = parse_env_var("CONDUIT_TEST_BAD_NUMBER");
        assert!(parsed.is_err());

        let missing: Option<u64> = parse_env_var("CONDUIT_TEST_UNSET_NUMBER").unwrap();
        assert!(missing.is_none());
    }
}
