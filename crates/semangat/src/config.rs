use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// Config (root)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default)]
    pub ai: AiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            static_dir: default_static_dir(),
            ai: AiConfig::default(),
        }
    }
}

impl Config {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::Io(e)),
        };
        Ok(serde_saphyr::from_str(&contents)?)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides using `lookup` to resolve variable names.
    ///
    /// Recognised: `GROQ_API_KEY`, `OPENAI_API_KEY`, `DEFAULT_MODEL`, `PORT`, `STATIC_DIR`.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("GROQ_API_KEY") {
            self.ai.groq.api_key = Some(key);
        }
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.ai.openai.api_key = Some(key);
        }
        if let Some(model) = lookup("DEFAULT_MODEL").filter(|m| !m.is_empty()) {
            self.ai.default_model = model;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv {
                    name: "PORT",
                    value: port,
                })?;
        }
        if let Some(dir) = lookup("STATIC_DIR").filter(|d| !d.is_empty()) {
            self.static_dir = PathBuf::from(dir);
        }
        Ok(())
    }
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

// ============================================================================
// ServerConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    120
}

// ============================================================================
// AiConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AiConfig {
    /// Model used when a request does not name one.
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Upper bound on a single upstream call.
    #[serde(default = "default_upstream_timeout")]
    pub upstream_timeout_seconds: u64,
    #[serde(default)]
    pub groq: GroqConfig,
    #[serde(default)]
    pub openai: OpenAIConfig,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            upstream_timeout_seconds: default_upstream_timeout(),
            groq: GroqConfig::default(),
            openai: OpenAIConfig::default(),
        }
    }
}

fn default_model() -> String {
    "llama3-70b-8192".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    600
}

fn default_upstream_timeout() -> u64 {
    30
}

// ============================================================================
// GroqConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GroqConfig {
    #[serde(default = "default_groq_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            base_url: default_groq_base_url(),
            api_key: None,
        }
    }
}

fn default_groq_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

// ============================================================================
// OpenAIConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OpenAIConfig {
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Requested models starting with this prefix are sent as-is.
    #[serde(default = "default_openai_model_prefix")]
    pub model_prefix: String,
    /// Model sent when the requested one does not match `model_prefix`.
    #[serde(default = "default_openai_fallback_model")]
    pub fallback_model: String,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: default_openai_base_url(),
            api_key: None,
            model_prefix: default_openai_model_prefix(),
            fallback_model: default_openai_fallback_model(),
        }
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model_prefix() -> String {
    "gpt".to_string()
}

fn default_openai_fallback_model() -> String {
    "gpt-4o-mini".to_string()
}

// ============================================================================
// ConfigError
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_saphyr::Error),

    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },
}

// ============================================================================
// Tests
// ============================================================================
