//! Core crate for my-ai-tiger: configuration and the chat types shared by
//! the provider gateway and the CLI.

pub mod config;
pub mod types;

pub use config::{load_config, Config};
pub use types::{ChatMessage, ChatRequest, GenerateRequest, MessageContent};
