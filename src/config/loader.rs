use std::path::Path;

use super::{AppConfig, ConfigError};

/// Load configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_config() {
        let result = load_config("/nonexistent/config.yaml");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let temp_dir = std::env::temp_dir();
        let temp_file = temp_dir.join("test_relay_invalid_config.yaml");
        std::fs::write(&temp_file, "invalid: yaml: content: [").unwrap();

        let result = load_config(&temp_file);
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));

        let _ = std::fs::remove_file(&temp_file);
    }

    #[test]
    fn test_load_config_valid() {
        let temp_dir = std::env::temp_dir();
        let temp_file = temp_dir.join("test_relay_valid_config.yaml");

        let config_content = r#"
server:
  port: 8071
  host: "127.0.0.1"

provider:
  url: "http://localhost:9090"
  model: "gemini-test"
  api_key: "secret-key"
  timeout_seconds: 30
  system_instruction: "Answer briefly."
"#;
        std::fs::write(&temp_file, config_content).unwrap();

        let result = load_config(&temp_file);
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config.server.port, 8071);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.provider.url, "http://localhost:9090");
        assert_eq!(config.provider.model, "gemini-test");
        assert_eq!(config.provider.api_key.as_deref(), Some("secret-key"));
        assert_eq!(config.provider.timeout_seconds, 30);
        assert_eq!(config.provider.system_instruction, "Answer briefly.");

        let _ = std::fs::remove_file(&temp_file);
    }

    #[test]
    fn test_load_config_minimal() {
        let temp_dir = std::env::temp_dir();
        let temp_file = temp_dir.join("test_relay_minimal_config.yaml");

        // Every section has defaults; an empty mapping is a valid config
        std::fs::write(&temp_file, "server:\n  port: 8099\n").unwrap();

        let result = load_config(&temp_file);
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config.server.port, 8099);
        assert_eq!(config.provider.model, "gemini-2.5-flash-preview-05-20");
        assert!(config.provider.api_key.is_none());

        let _ = std::fs::remove_file(&temp_file);
    }

    #[test]
    fn test_config_from_file() {
        let result = AppConfig::from_file("/nonexistent/path.yaml");
        assert!(result.is_err());
    }
}
