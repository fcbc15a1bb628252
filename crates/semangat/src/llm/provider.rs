//! LLM provider trait and model selection policy.

use std::fmt;

use async_trait::async_trait;

use super::error::LLMError;

/// Trait for chat-completion backends.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a single-turn prompt and return the reply text.
    ///
    /// `model` is the caller's resolved model; implementations may substitute
    /// their own according to their [`ModelPolicy`].
    async fn complete(&self, prompt: &str, model: &str) -> Result<String, LLMError>;
}

/// Known provider kinds, in no particular priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Groq,
    OpenAI,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Groq => write!(f, "groq"),
            Provider::OpenAI => write!(f, "openai"),
        }
    }
}

/// How a provider maps the requested model name onto one it can serve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModelPolicy {
    /// Send the requested model unchanged.
    #[default]
    Passthrough,
    /// Keep models starting with `prefix`, otherwise use `fallback`.
    Prefixed { prefix: String, fallback: String },
}

impl ModelPolicy {
    pub fn resolve<'a>(&'a self, requested: &'a str) -> &'a str {
        match self {
            ModelPolicy::Passthrough => requested,
            ModelPolicy::Prefixed { prefix, fallback } => {
                if requested.starts_with(prefix.as_str()) {
                    requested
                } else {
                    fallback
                }
            }
        }
    }
}
