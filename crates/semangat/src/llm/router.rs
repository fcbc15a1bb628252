//! Ordered provider router with fallback.
//!
//! Providers are registered in priority order at startup. A request walks the
//! list once, returning the first success; a failing provider is logged and
//! skipped unless it is the last one, whose error is surfaced to the caller.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::error::LLMError;
use super::openai::OpenAICompatibleProvider;
use super::provider::{ChatProvider, ModelPolicy, Provider};
use super::types::ChatReply;
use crate::config::AiConfig;

/// Errors surfaced by [`ProviderRouter::route`].
#[derive(Debug, Error)]
pub enum RouteError {
    /// No provider has credentials.
    #[error("no AI provider configured")]
    NoProviders,

    /// The last provider in the chain failed.
    #[error("{provider} request failed: {source}")]
    Upstream {
        provider: Provider,
        #[source]
        source: LLMError,
    },
}

#[derive(Clone)]
struct ProviderSlot {
    kind: Provider,
    implementation: Arc<dyn ChatProvider>,
}

/// Priority-ordered list of chat providers.
#[derive(Clone)]
pub struct ProviderRouter {
    slots: Vec<ProviderSlot>,
    default_model: String,
}

impl ProviderRouter {
    pub fn new(default_model: impl Into<String>) -> Self {
        Self {
            slots: Vec::new(),
            default_model: default_model.into(),
        }
    }

    /// Build the Groq-then-OpenAI chain from configuration.
    ///
    /// Providers without an API key (or with an empty one) are skipped.
    pub fn from_config(config: &AiConfig) -> Result<Self, LLMError> {
        let mut router = Self::new(config.default_model.clone());
        let timeout = Duration::from_secs(config.upstream_timeout_seconds);

        if let Some(api_key) = non_empty(&config.groq.api_key) {
            let provider =
                OpenAICompatibleProvider::new(&config.groq.base_url, Some(api_key), timeout)?
                    .with_temperature(config.temperature)
                    .with_max_tokens(config.max_tokens);
            router.register(Provider::Groq, Arc::new(provider));
            info!("Registered Groq provider");
        }

        if let Some(api_key) = non_empty(&config.openai.api_key) {
            let provider =
                OpenAICompatibleProvider::new(&config.openai.base_url, Some(api_key), timeout)?
                    .with_max_tokens(config.max_tokens)
                    .with_model_policy(ModelPolicy::Prefixed {
                        prefix: config.openai.model_prefix.clone(),
                        fallback: config.openai.fallback_model.clone(),
                    });
            router.register(Provider::OpenAI, Arc::new(provider));
            info!("Registered OpenAI provider");
        }

        if router.is_empty() {
            warn!("No LLM providers configured. Set GROQ_API_KEY or OPENAI_API_KEY.");
        }

        Ok(router)
    }

    /// Append a provider at the lowest priority.
    pub fn register(&mut self, kind: Provider, implementation: Arc<dyn ChatProvider>) {
        self.slots.push(ProviderSlot {
            kind,
            implementation,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Registered providers in attempt order.
    pub fn providers(&self) -> impl Iterator<Item = Provider> + '_ {
        self.slots.iter().map(|slot| slot.kind)
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// The requested model, or the default when absent or empty.
    pub fn resolve_model<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .filter(|m| !m.is_empty())
            .unwrap_or(&self.default_model)
    }

    /// Try each provider in order; the first success wins.
    pub async fn route(
        &self,
        prompt: &str,
        requested_model: Option<&str>,
    ) -> Result<ChatReply, RouteError> {
        let model = self.resolve_model(requested_model);
        let last = self.slots.len().saturating_sub(1);

        for (attempt, slot) in self.slots.iter().enumerate() {
            debug!(provider = %slot.kind, model, attempt = attempt + 1, "Trying provider");

            match slot.implementation.complete(prompt, model).await {
                Ok(reply) => return Ok(ChatReply { reply }),
                Err(e) if attempt < last => {
                    warn!(
                        provider = %slot.kind,
                        model,
                        error = %e,
                        "Provider call failed, falling back to next provider"
                    );
                }
                Err(e) => {
                    error!(provider = %slot.kind, model, error = %e, "Provider call failed");
                    return Err(RouteError::Upstream {
                        provider: slot.kind,
                        source: e,
                    });
                }
            }
        }

        Err(RouteError::NoProviders)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    /// Provider double recording the models it was asked for.
    struct FakeProvider {
        reply: Option<&'static str>,
        calls: AtomicUsize,
        models: Mutex<Vec<String>>,
    }

    impl FakeProvider {
        fn ok(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply),
                calls: AtomicUsize::new(0),
                models: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                calls: AtomicUsize::new(0),
                models: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatProvider for FakeProvider {
        async fn complete(&self, _prompt: &str, model: &str) -> Result<String, LLMError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.models.lock().unwrap().push(model.to_string());
            match self.reply {
                Some(reply) => Ok(reply.to_string()),
                None => Err(LLMError::Api {
                    status: 502,
                    message: "bad gateway".to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_empty_router_reports_no_providers() {
        let router = ProviderRouter::new("llama3-70b-8192");
        let result = router.route("hello", None).await;
        assert!(matches!(result, Err(RouteError::NoProviders)));
    }

    #[tokio::test]
    async fn test_primary_success_skips_secondary() {
        let primary = FakeProvider::ok("from groq");
        let secondary = FakeProvider::ok("from openai");
        let mut router = ProviderRouter::new("llama3-70b-8192");
        router.register(Provider::Groq, primary.clone());
        router.register(Provider::OpenAI, secondary.clone());

        let reply = router.route("hello", None).await.unwrap();
        assert_eq!(reply.reply, "from groq");
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn test_primary_failure_falls_back() {
        let primary = FakeProvider::failing();
        let secondary = FakeProvider::ok("from openai");
        let mut router = ProviderRouter::new("llama3-70b-8192");
        router.register(Provider::Groq, primary.clone());
        router.register(Provider::OpenAI, secondary.clone());

        let reply = router.route("hello", None).await.unwrap();
        assert_eq!(reply.reply, "from openai");
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test]
    async fn test_last_failure_is_surfaced() {
        let primary = FakeProvider::failing();
        let secondary = FakeProvider::failing();
        let mut router = ProviderRouter::new("llama3-70b-8192");
        router.register(Provider::Groq, primary.clone());
        router.register(Provider::OpenAI, secondary.clone());

        let err = router.route("hello", None).await.unwrap_err();
        match err {
            RouteError::Upstream { provider, source } => {
                assert_eq!(provider, Provider::OpenAI);
                assert!(matches!(source, LLMError::Api { status: 502, .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test]
    async fn test_sole_provider_failure_is_surfaced() {
        let only = FakeProvider::failing();
        let mut router = ProviderRouter::new("llama3-70b-8192");
        router.register(Provider::Groq, only.clone());

        let err = router.route("hello", None).await.unwrap_err();
        assert!(matches!(
            err,
            RouteError::Upstream {
                provider: Provider::Groq,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_model_resolution() {
        let provider = FakeProvider::ok("ok");
        let mut router = ProviderRouter::new("llama3-70b-8192");
        router.register(Provider::Groq, provider.clone());

        router.route("a", None).await.unwrap();
        router.route("b", Some("")).await.unwrap();
        router.route("c", Some("gpt-4o")).await.unwrap();

        let models = provider.models.lock().unwrap().clone();
        assert_eq!(models, vec!["llama3-70b-8192", "llama3-70b-8192", "gpt-4o"]);
    }

    #[test]
    fn test_from_config_skips_missing_and_empty_keys() {
        let mut config = AiConfig::default();
        let router = ProviderRouter::from_config(&config).unwrap();
        assert!(router.is_empty());

        config.groq.api_key = Some(String::new());
        config.openai.api_key = Some("sk-test".to_string());
        let router = ProviderRouter::from_config(&config).unwrap();
        assert_eq!(router.providers().collect::<Vec<_>>(), vec![Provider::OpenAI]);

        config.groq.api_key = Some("gsk-test".to_string());
        let router = ProviderRouter::from_config(&config).unwrap();
        assert_eq!(
            router.providers().collect::<Vec<_>>(),
            vec![Provider::Groq, Provider::OpenAI]
        );
        assert_eq!(router.default_model(), "llama3-70b-8192");
    }
}
