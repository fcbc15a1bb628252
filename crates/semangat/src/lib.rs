//! Semangat - motivational quotes, share links and an LLM chat proxy behind one small HTTP server.

pub mod config;
pub mod handlers;
pub mod llm;
pub mod quotes;
pub mod response;
pub mod server;
pub mod share;
