mod loader;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use loader::load_config;

/// Environment variable consulted when the config file carries no API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Instruction sent alongside every prompt unless overridden in config
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "Provide a short, quick, and brief \
explanation for an undergraduate electrical engineering student. The explanation \
should be a single, concise paragraph.";

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Relay server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8070
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// Generative-language provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Provider base URL (e.g., "https://generativelanguage.googleapis.com")
    #[serde(default = "default_provider_url")]
    pub url: String,
    /// Model identifier used in the generateContent path
    #[serde(default = "default_model")]
    pub model: String,
    /// API key; falls back to GEMINI_API_KEY from the environment
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// System instruction text sent with every prompt
    #[serde(default = "default_system_instruction")]
    pub system_instruction: String,
}

fn default_provider_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash-preview-05-20".to_string()
}

fn default_timeout() -> u64 {
    300
}

fn default_system_instruction() -> String {
    DEFAULT_SYSTEM_INSTRUCTION.to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            url: default_provider_url(),
            model: default_model(),
            api_key: None,
            timeout_seconds: default_timeout(),
            system_instruction: default_system_instruction(),
        }
    }
}

impl ProviderConfig {
    /// Returns the base URL with trailing slash stripped
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Returns true if the URL uses HTTPS
    pub fn is_tls(&self) -> bool {
        self.url.to_lowercase().starts_with("https://")
    }

    /// Resolve the API key from config, falling back to the environment.
    ///
    /// Called once at startup; the request path never touches the environment.
    pub fn resolved_api_key(&self) -> Option<String> {
        Self::pick_api_key(self.api_key.clone(), std::env::var(API_KEY_ENV).ok())
    }

    fn pick_api_key(configured: Option<String>, env: Option<String>) -> Option<String> {
        configured
            .filter(|k| !k.trim().is_empty())
            .or_else(|| env.filter(|k| !k.trim().is_empty()))
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_config(path)
    }

    /// Load configuration with fallback to default paths, then to defaults
    ///
    /// An explicit path must exist; without one, missing default paths are
    /// not an error since every field has a usable default.
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => {
                let default_paths = ["config.yaml", "config.yml", "./config/config.yaml"];
                for p in default_paths {
                    let path = Path::new(p);
                    if path.exists() {
                        return Self::from_file(path);
                    }
                }
                Ok(Self::default())
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_config_base_url() {
        let config = ProviderConfig::default();
        assert_eq!(config.base_url(), "https://generativelanguage.googleapis.com");
        assert!(config.is_tls());
    }

    #[test]
    fn test_provider_config_trailing_slash() {
        let config = ProviderConfig {
            url: "http://localhost:9090/".to_string(),
            ..ProviderConfig::default()
        };
        assert_eq!(config.base_url(), "http://localhost:9090");
        assert!(!config.is_tls());
    }

    #[test]
    fn test_provider_config_defaults() {
        let config = ProviderConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash-preview-05-20");
        assert_eq!(config.timeout_seconds, 300);
        assert!(config.api_key.is_none());
        assert_eq!(config.system_instruction, DEFAULT_SYSTEM_INSTRUCTION);
    }

    #[test]
    fn test_pick_api_key_prefers_configured() {
        let key = ProviderConfig::pick_api_key(
            Some("from-config".to_string()),
            Some("from-env".to_string()),
        );
        assert_eq!(key.as_deref(), Some("from-config"));
    }

    #[test]
    fn test_pick_api_key_env_fallback() {
        let key = ProviderConfig::pick_api_key(None, Some("from-env".to_string()));
        assert_eq!(key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_pick_api_key_ignores_blank() {
        let key = ProviderConfig::pick_api_key(Some("   ".to_string()), None);
        assert!(key.is_none());
        assert!(ProviderConfig::pick_api_key(None, None).is_none());
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8070);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let config = AppConfig::load_or_default(None).unwrap();
        assert_eq!(config.provider.base_url(), "https://generativelanguage.googleapis.com");
    }
}
