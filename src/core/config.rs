//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated
//! from defaults and environment variables (optionally via a `.env` file).

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default DataForSEO API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.dataforseo.com/v3";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// DataForSEO API client configuration.
    pub dataforseo: DataForSeoConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Connection settings for the DataForSEO API.
#[derive(Clone, Serialize, Deserialize)]
pub struct DataForSeoConfig {
    /// Base URL every tool path is appended to.
    pub base_url: String,

    /// API login (the account e-mail).
    pub username: Option<String>,

    /// API password.
    pub password: Option<String>,

    /// Per-request timeout. `None` leaves requests unbounded.
    pub timeout_secs: Option<u64>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for DataForSeoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataForSeoConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl DataForSeoConfig {
    /// Whether both halves of the Basic auth credentials are present.
    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

impl Default for DataForSeoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            username: None,
            password: None,
            timeout_secs: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "dataforseo-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            dataforseo: DataForSeoConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`, ...). API settings use the
    /// `DATAFORSEO_` prefix.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(base_url) = std::env::var("DATAFORSEO_BASE_URL") {
            info!("DataForSEO base URL overridden: {}", base_url);
            config.dataforseo.base_url = base_url;
        }

        config.dataforseo.username = std::env::var("DATAFORSEO_USERNAME").ok();
        config.dataforseo.password = std::env::var("DATAFORSEO_PASSWORD").ok();
        if !config.dataforseo.has_credentials() {
            warn!(
                "DATAFORSEO_USERNAME / DATAFORSEO_PASSWORD not set - \
                 API calls will fail with an authentication error"
            );
        }

        if let Ok(timeout) = std::env::var("DATAFORSEO_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.dataforseo.timeout_secs = Some(secs),
                Err(_) => warn!("Ignoring invalid DATAFORSEO_TIMEOUT_SECS: {}", timeout),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_credentials_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("DATAFORSEO_USERNAME", "seo@example.com");
            std::env::set_var("DATAFORSEO_PASSWORD", "hunter2");
        }
        let config = Config::from_env();
        assert_eq!(config.dataforseo.username.as_deref(), Some("seo@example.com"));
        assert_eq!(config.dataforseo.password.as_deref(), Some("hunter2"));
        assert!(config.dataforseo.has_credentials());
        unsafe {
            std::env::remove_var("DATAFORSEO_USERNAME");
            std::env::remove_var("DATAFORSEO_PASSWORD");
        }
    }

    #[test]
    fn test_timeout_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("DATAFORSEO_TIMEOUT_SECS", "45");
        }
        assert_eq!(Config::from_env().dataforseo.timeout_secs, Some(45));

        unsafe {
            std::env::set_var("DATAFORSEO_TIMEOUT_SECS", "soon");
        }
        assert_eq!(Config::from_env().dataforseo.timeout_secs, None);
        unsafe {
            std::env::remove_var("DATAFORSEO_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_password_redacted_in_debug() {
        let config = DataForSeoConfig {
            username: Some("seo@example.com".to_string()),
            password: Some("super_secret_password".to_string()),
            ..Default::default()
        };
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_password"));
    }

    #[test]
    fn test_default_base_url() {
        let config = Config::default();
        assert_eq!(config.dataforseo.base_url, DEFAULT_API_BASE_URL);
        assert!(!config.dataforseo.has_credentials());
    }
}
