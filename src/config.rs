use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub market_data: MarketDataConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketDataConfig {
    /// Days of daily history requested from the chart endpoint
    #[serde(default = "default_history_days")]
    pub history_days: u32,
    /// Points kept per series after the fetch
    #[serde(default = "default_window")]
    pub window: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            history_days: default_history_days(),
            window: default_window(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_bind_addr() -> SocketAddr { SocketAddr::from(([0, 0, 0, 0], 8000)) }
fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "https://crypto-predictor-ai.vercel.app".to_string(),
    ]
}
fn default_history_days() -> u32 { 30 }
fn default_window() -> usize { 7 }
fn default_model() -> String { "gpt-3.5-turbo-instruct".to_string() }
fn default_temperature() -> f32 { 0.7 }
fn default_max_tokens() -> u32 { 2000 }

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub openai_api_key: String,
    pub openai_api_url: String,
    pub coingecko_api_url: String,
    pub config_path: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        Ok(config)
    }

    /// Like [`Config::load`], but a missing file means all defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            tracing::info!("No config file at {}, using defaults", path);
            Ok(Self::default())
        }
    }
}

impl EnvConfig {
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        Ok(Self {
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .context("OPENAI_API_KEY not set")?,
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            coingecko_api_url: std::env::var("COINGECKO_API_URL")
                .unwrap_or_else(|_| "https://api.coingecko.com/api/v3".to_string()),
            config_path: std::env::var("CONFIG_PATH")
                .unwrap_or_else(|_| "config.toml".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.server.bind_addr.port(), 8000);
        assert_eq!(config.server.cors_origins.len(), 2);
        assert_eq!(config.market_data.history_days, 30);
        assert_eq!(config.market_data.window, 7);
        assert_eq!(config.completion.max_tokens, 2000);
        assert!((config.completion.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_config_overrides() {
        let config: Config = toml::from_str(
            r#"
            [server]
            bind_addr = "127.0.0.1:9000"

            [completion]
            model = "davinci-002"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(config.server.cors_origins[0], "http://localhost:3000");
        assert_eq!(config.completion.model, "davinci-002");
        assert_eq!(config.completion.max_tokens, 2000);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default("does/not/exist.toml").unwrap();
        assert_eq!(config.market_data.history_days, 30);
    }
}
