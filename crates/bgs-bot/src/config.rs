//! Configuration management for bgs-bot

#[path = "config_tests.rs"]
mod config_tests;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

/// Complete bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub discord: DiscordConfig,
    #[serde(default)]
    pub ebgs: EbgsConfig,
}

/// Discord-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Bot token from the Discord developer portal
    #[serde(default = "default_bot_token")]
    pub bot_token: String,
}

/// Statistics API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EbgsConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout; expiry is treated as a transport failure.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EbgsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EbgsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Environment lookup, replaceable in tests.
pub trait ReadEnv {
    fn var(&self, key: &str) -> Option<String>;
}

/// [`ReadEnv`] backed by the process environment.
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_env_impl(&SystemEnv)
    }

    pub fn from_env_impl(env: &impl ReadEnv) -> Result<Self> {
        let bot_token = env
            .var("DISCORD_BOT_TOKEN")
            .context("DISCORD_BOT_TOKEN not set")?;

        let base_url = env.var("EBGS_BASE_URL").unwrap_or_else(default_base_url);

        let timeout_secs = env
            .var("EBGS_TIMEOUT_SECS")
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(default_timeout_secs);

        Ok(Config {
            discord: DiscordConfig { bot_token },
            ebgs: EbgsConfig {
                base_url,
                timeout_secs,
            },
        })
    }
}

fn default_bot_token() -> String {
    std::env::var("DISCORD_BOT_TOKEN").unwrap_or_default()
}

fn default_base_url() -> String {
    elitebgs_client::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
