//! Configuration management for FolioQA
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from a YAML file plus environment variables. Every field
//! is defaulted, so a missing config file still yields a runnable service.
//!
//! The Gemini API key is deliberately env-only (`GEMINI_API_KEY`): it never
//! appears in the config file.

use crate::error::{FolioError, Result};
use crate::providers::gemini::DEFAULT_API_BASE;
use crate::response_mode::{ResponseMode, AUTO_MODE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable overriding the CORS origin allow-list
/// (comma-separated)
pub const ALLOWED_ORIGINS_ENV: &str = "FOLIOQA_ALLOWED_ORIGINS";

/// Main configuration structure for FolioQA
///
/// Holds the HTTP server settings, generation-provider settings, and chat
/// behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Generation provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Chat behavior configuration
    #[serde(default)]
    pub chat: ChatConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS origin allow-list; "*" permits any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

/// Provider configuration
///
/// Specifies which generation provider to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    /// Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
}

fn default_provider_type() -> String {
    "gemini".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            gemini: GeminiConfig::default(),
        }
    }
}

/// Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model to use for generation
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API base URL (useful for tests and local mocks)
    ///
    /// When set to a non-default value, requests are built against this
    /// base, which allows tests to point the provider at a mock server.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Number of immediate retries after a transient failure (no backoff)
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_gemini_model() -> String {
    "gemini-flash-lite-latest".to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_max_retries() -> usize {
    2
}

fn default_timeout_seconds() -> u64 {
    60
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_base: default_api_base(),
            max_retries: default_max_retries(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Chat behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Mode applied when the request omits one: "auto" or a concrete mode
    #[serde(default = "default_chat_mode")]
    pub default_mode: String,

    /// Maximum exchanges retained per session
    #[serde(default = "default_max_exchanges")]
    pub max_exchanges: usize,

    /// How many recent exchanges are serialized into the prompt
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Optional file replacing the built-in portfolio context
    #[serde(default)]
    pub context_file: Option<PathBuf>,
}

fn default_chat_mode() -> String {
    AUTO_MODE.to_string()
}

fn default_max_exchanges() -> usize {
    crate::session::DEFAULT_MAX_EXCHANGES
}

fn default_history_window() -> usize {
    3
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_mode: default_chat_mode(),
            max_exchanges: default_max_exchanges(),
            history_window: default_history_window(),
            context_file: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file, falling back to defaults when
    /// the file does not exist
    ///
    /// Environment overrides are applied after file parsing:
    /// `FOLIOQA_ALLOWED_ORIGINS` replaces the CORS allow-list.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| FolioError::Config(format!("Failed to read {:?}: {}", path, e)))?;
            serde_yaml::from_str(&contents)
                .map_err(|e| FolioError::Config(format!("Failed to parse {:?}: {}", path, e)))?
        } else {
            tracing::debug!("Config file {:?} not found, using defaults", path);
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment-variable overrides on top of file values
    fn apply_env_overrides(&mut self) {
        if let Ok(origins) = std::env::var(ALLOWED_ORIGINS_ENV) {
            let parsed: Vec<String> = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !parsed.is_empty() {
                self.server.allowed_origins = parsed;
            }
        }
    }

    /// Read the Gemini API key from the environment
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::MissingCredentials`] if `GEMINI_API_KEY` is
    /// unset or empty
    pub fn api_key(&self) -> Result<String> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(FolioError::MissingCredentials(format!(
                "{} ({} is not set)",
                self.provider.provider_type, API_KEY_ENV
            ))
            .into()),
        }
    }

    /// Load the portfolio context, preferring `chat.context_file` when set
    ///
    /// # Errors
    ///
    /// Returns error if a context file is configured but unreadable
    pub fn load_context(&self) -> Result<String> {
        match &self.chat.context_file {
            Some(path) => std::fs::read_to_string(path).map_err(|e| {
                FolioError::Config(format!("Failed to read context file {:?}: {}", path, e)).into()
            }),
            None => Ok(crate::prompts::DEFAULT_PORTFOLIO_CONTEXT.to_string()),
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error when a field holds a value the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.provider.provider_type != "gemini" {
            return Err(FolioError::Config(format!(
                "Unknown provider type: {}",
                self.provider.provider_type
            ))
            .into());
        }

        if self.provider.gemini.model.trim().is_empty() {
            return Err(FolioError::Config("Gemini model must not be empty".to_string()).into());
        }

        if self.provider.gemini.timeout_seconds == 0 {
            return Err(
                FolioError::Config("Provider timeout must be at least 1 second".to_string()).into(),
            );
        }

        if self.chat.max_exchanges == 0 {
            return Err(
                FolioError::Config("chat.max_exchanges must be at least 1".to_string()).into(),
            );
        }

        if self.chat.history_window == 0 {
            return Err(
                FolioError::Config("chat.history_window must be at least 1".to_string()).into(),
            );
        }

        let mode = self.chat.default_mode.as_str();
        if !mode.eq_ignore_ascii_case(AUTO_MODE) && ResponseMode::parse_str(mode).is_err() {
            return Err(FolioError::Config(format!(
                "chat.default_mode must be \"auto\" or a known mode, got {:?}",
                mode
            ))
            .into());
        }

        if self.server.allowed_origins.is_empty() {
            return Err(
                FolioError::Config("server.allowed_origins must not be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}
