//! Question answering over a hosted LLM: text normalization for display,
//! the remote answer client, and the CLI, web and model-listing frontends.

pub mod chat;
pub mod config;
pub mod llm;
pub mod models;
pub mod server;
pub mod text;
