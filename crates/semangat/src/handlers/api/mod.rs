//! `/api` handlers.

mod ai;
mod payload;
mod quote;
mod social;

pub use ai::{AiRequest, ask_ai};
pub use payload::Payload;
pub use quote::{QuoteResponse, random_quote};
pub use social::{ShareRequest, ShareResponse, share_link};
