//! prompt-relay: HTTP gateway for the Gemini generateContent API
//!
//! A small axum server that validates `{ "prompt": ... }` POSTs and forwards
//! them to the provider's generateContent endpoint with a fixed system
//! instruction and search augmentation enabled, relaying the provider's
//! response back to the caller.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

use prompt_relay::{config::ConfigError, run_server, AppConfig};

#[derive(Parser)]
#[command(name = "prompt-relay")]
#[command(version = "0.1.0")]
#[command(about = "HTTP gateway for the Gemini generateContent API")]
#[command(long_about = "
prompt-relay accepts text prompts over HTTP POST and forwards them to the
Gemini generateContent API with a fixed system instruction and web-search
augmentation enabled, relaying the provider's response (or a translated
error) back to the caller.

Example usage:
  prompt-relay run --config config.yaml
  GEMINI_API_KEY=... prompt-relay run
  prompt-relay test-provider
")]
struct Cli {
    /// Path to config file (optional; defaults plus GEMINI_API_KEY suffice)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Set logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the relay server
    Run {
        /// Override listen port
        #[arg(short, long)]
        port: Option<u16>,
        /// Override provider base URL (e.g., "http://localhost:9090")
        #[arg(long)]
        provider_url: Option<String>,
    },

    /// Validate configuration file
    CheckConfig,

    /// Test connection to the provider (lists available models)
    TestProvider,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level_filter = if let Some(level) = cli.log_level {
        level.to_string()
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
            .to_string()
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&level_filter))
        .init();

    match cli.command {
        Commands::Run { port, provider_url } => {
            run_relay(cli.config, port, provider_url).await?;
        }
        Commands::CheckConfig => {
            check_config(cli.config)?;
        }
        Commands::TestProvider => {
            test_provider(cli.config).await?;
        }
    }

    Ok(())
}

/// Run the relay server
async fn run_relay(
    config_path: Option<PathBuf>,
    port_override: Option<u16>,
    provider_url_override: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config_or_exit(config_path.as_deref());

    // Apply CLI overrides
    if let Some(port) = port_override {
        config.server.port = port;
    }
    if let Some(url) = provider_url_override {
        config.provider.url = url;
    }

    run_server(config).await?;

    Ok(())
}

/// Validate configuration file
fn check_config(config_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    match AppConfig::load_or_default(config_path.as_deref()) {
        Ok(config) => {
            println!("✓ Configuration is valid\n");
            println!("Server:");
            println!("  Listen: {}:{}", config.server.host, config.server.port);
            println!("\nProvider:");
            println!("  URL: {}", config.provider.base_url());
            println!("  Model: {}", config.provider.model);
            println!("  TLS: {}", if config.provider.is_tls() { "enabled" } else { "disabled" });
            println!("  Timeout: {}s", config.provider.timeout_seconds);
            // Never print the key itself
            match config.provider.resolved_api_key() {
                Some(_) => println!("  API key: configured"),
                None => println!("  API key: MISSING (set provider.api_key or GEMINI_API_KEY)"),
            }
            println!("\nSystem instruction:");
            println!("  {}", config.provider.system_instruction);
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Configuration error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Test connection to the provider by listing available models
async fn test_provider(config_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_or_exit(config_path.as_deref());

    let Some(api_key) = config.provider.resolved_api_key() else {
        eprintln!("✗ No API key configured (set provider.api_key or GEMINI_API_KEY)");
        std::process::exit(1);
    };

    let models_url = format!("{}/v1beta/models", config.provider.base_url());
    println!("Testing connection to provider: {}", models_url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;

    match client
        .get(&models_url)
        .query(&[("key", api_key.as_str())])
        .send()
        .await
    {
        Ok(resp) => {
            if resp.status().is_success() {
                println!("✓ Provider is reachable");
                println!("  Status: {}", resp.status());

                if let Ok(json) = resp.json::<serde_json::Value>().await {
                    if let Some(models) = json.get("models").and_then(|m| m.as_array()) {
                        println!("  Available models: {}", models.len());
                        for model in models.iter().take(5) {
                            if let Some(name) = model.get("name").and_then(|n| n.as_str()) {
                                println!("    - {}", name);
                            }
                        }
                    }
                }
            } else {
                println!("✗ Provider returned error status: {}", resp.status());
                if let Ok(body) = resp.text().await {
                    println!("  Response: {}", body.trim());
                }
                std::process::exit(1);
            }
        }
        Err(e) => {
            println!("✗ Failed to connect to provider: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Load configuration or exit with error
fn load_config_or_exit(config_path: Option<&std::path::Path>) -> AppConfig {
    match AppConfig::load_or_default(config_path) {
        Ok(config) => config,
        Err(e @ ConfigError::NotFound(_)) => {
            eprintln!("Error loading configuration: {}", e);
            eprintln!("\nYou can copy config.yaml.default and modify it:");
            eprintln!("  cp config.yaml.default config.yaml");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    }
}
