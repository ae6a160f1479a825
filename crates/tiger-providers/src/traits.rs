//! The seam between the HTTP layer and the provider dispatcher.
//!
//! The gateway only ever sees `Arc<dyn ChatDispatcher>`; the real
//! implementation is [`Dispatcher`](crate::dispatcher::Dispatcher).

use async_trait::async_trait;
use serde_json::Value;
use tiger_core::types::ChatRequest;

/// Final answer for one dispatched request: an HTTP status and a JSON body.
#[derive(Clone, Debug, PartialEq)]
pub struct DispatchOutcome {
    pub status: u16,
    pub body: Value,
}

/// Forwards a chat request to the provider named by `selector`.
#[async_trait]
pub trait ChatDispatcher: Send + Sync {
    /// Dispatch one request. Never fails: every error is folded into the
    /// outcome's status and body.
    async fn dispatch(&self, selector: &str, request: &ChatRequest) -> DispatchOutcome;
}
