//! LLM provider clients and the fallback router.

mod error;
mod openai;
mod provider;
mod router;
mod types;

pub use error::LLMError;
pub use openai::OpenAICompatibleProvider;
pub use provider::{ChatProvider, ModelPolicy, Provider};
pub use router::{ProviderRouter, RouteError};
pub use types::{ChatReply, ChatRequest, ChatResponse, Message, Role};
