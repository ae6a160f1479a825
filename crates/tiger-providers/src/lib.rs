//! Provider layer for my-ai-tiger.
//!
//! # Architecture
//!
//! - [`registry`] — static specs for the three supported upstreams + selector resolution
//! - [`dispatcher::Dispatcher`] — one OpenAI-compatible HTTP client serving every profile
//! - [`reply::ReplyShape`] — best-effort extraction of the assistant reply
//! - [`error::DispatchError`] — configuration / upstream / internal failures and their HTTP mapping
//! - [`traits::ChatDispatcher`] — the seam the HTTP layer talks to

pub mod dispatcher;
pub mod error;
pub mod registry;
pub mod reply;
pub mod traits;

// Re-export main types for convenience
pub use dispatcher::{Dispatcher, GenerateReply, ProviderProfile, REQUEST_TIMEOUT};
pub use error::DispatchError;
pub use registry::{resolve_selector, selector_position, ProviderSpec, DEFAULT_SELECTOR, PROVIDERS};
pub use reply::ReplyShape;
pub use traits::{ChatDispatcher, DispatchOutcome};
