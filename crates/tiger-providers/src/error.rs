//! Dispatch failures and their translation into HTTP responses.

use serde_json::{json, Value};
use thiserror::Error;

/// Everything that can go wrong while dispatching one chat request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The resolved provider has no API key. Raised before any network call.
    #[error("{env_key} not configured")]
    NotConfigured { env_key: &'static str },

    /// The upstream answered with a non-2xx status.
    #[error("upstream returned HTTP {status}")]
    Upstream { status: u16, details: Value },

    /// Network failure, timeout, malformed request or unparseable reply.
    #[error("{0}")]
    Internal(String),
}

impl DispatchError {
    /// HTTP status to answer the inbound caller with.
    pub fn status_code(&self) -> u16 {
        match self {
            DispatchError::NotConfigured { .. } => 500,
            DispatchError::Upstream { status, .. } => *status,
            DispatchError::Internal(_) => 500,
        }
    }

    /// JSON body to answer the inbound caller with.
    pub fn to_body(&self) -> Value {
        match self {
            DispatchError::NotConfigured { .. } => json!({ "error": self.to_string() }),
            DispatchError::Upstream { details, .. } => json!({
                "error": "upstream_error",
                "details": details,
            }),
            DispatchError::Internal(message) => json!({
                "error": "internal_error",
                "details": message,
            }),
        }
    }

    /// Build an upstream error from a raw error body.
    ///
    /// JSON bodies are surfaced as-is; anything unparseable is replaced by a
    /// generic message so HTML error pages never reach the caller.
    pub fn upstream(status: u16, body: &str) -> Self {
        let details = serde_json::from_str::<Value>(body)
            .unwrap_or_else(|_| Value::String(format!("upstream returned HTTP {status}")));
        DispatchError::Upstream { status, details }
    }
}

impl From<reqwest::Error> for DispatchError {
    fn from(e: reqwest::Error) -> Self {
        DispatchError::Internal(e.to_string())
    }
}

impl From<serde_json::Error> for DispatchError {
    fn from(e: serde_json::Error) -> Self {
        DispatchError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_body() {
        let err = DispatchError::NotConfigured { env_key: "GROQ_API_KEY" };
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_body(), json!({"error": "GROQ_API_KEY not configured"}));
    }

    #[test]
    fn test_upstream_json_details() {
        let err = DispatchError::upstream(429, r#"{"error":"rate limited"}"#);
        assert_eq!(err.status_code(), 429);
        assert_eq!(
            err.to_body(),
            json!({"error": "upstream_error", "details": {"error": "rate limited"}})
        );
    }

    #[test]
    fn test_upstream_text_body_gets_generic_message() {
        let err = DispatchError::upstream(503, "<html><body>Service Unavailable</body></html>");
        assert_eq!(err.status_code(), 503);
        assert_eq!(
            err.to_body(),
            json!({"error": "upstream_error", "details": "upstream returned HTTP 503"})
        );
    }

    #[test]
    fn test_upstream_empty_body_gets_generic_message() {
        let err = DispatchError::upstream(502, "  ");
        assert_eq!(err.to_body()["details"], "upstream returned HTTP 502");
    }

    #[test]
    fn test_internal_body() {
        let err = DispatchError::Internal("connection refused".into());
        assert_eq!(err.status_code(), 500);
        assert_eq!(
            err.to_body(),
            json!({"error": "internal_error", "details": "connection refused"})
        );
    }

    #[test]
    fn test_from_serde_error_is_internal() {
        let parse_err = serde_json::from_str::<Value>("{oops").unwrap_err();
        let err: DispatchError = parse_err.into();
        assert!(matches!(err, DispatchError::Internal(_)));
    }
}
