//! HTTP handlers: static page, info, health, and `/generate`.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{debug, info};

use tiger_core::types::GenerateRequest;
use tiger_providers::{ChatDispatcher, DispatchError, DEFAULT_SELECTOR};

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Header naming the provider; wins over the `provider` query parameter.
pub const PROVIDER_HEADER: &str = "x-provider";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<dyn ChatDispatcher>,
}

/// Build the gateway router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api", get(api_info))
        .route("/health", get(health))
        .route("/generate", post(generate))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn api_info() -> Json<Value> {
    Json(json!({ "status": "running", "message": "Welcome to my-ai-tiger" }))
}

async fn health() -> (StatusCode, Json<Value>) {
    debug!("Health check called");
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// `POST /generate` — forward a chat request to the selected provider.
///
/// The body is read leniently: anything that isn't a JSON object counts as
/// `{}`, i.e. an empty prompt. The query is read as raw pairs so a repeated
/// `provider` key picks the first value instead of rejecting the request.
async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Response {
    let query_provider = query
        .iter()
        .find(|(key, _)| key == "provider")
        .map(|(_, value)| value.as_str());
    let selector = headers
        .get(PROVIDER_HEADER)
        .and_then(|v| v.to_str().ok())
        .or(query_provider)
        .unwrap_or(DEFAULT_SELECTOR)
        .to_lowercase();

    let payload = serde_json::from_slice::<Value>(&body)
        .ok()
        .filter(Value::is_object)
        .unwrap_or_else(|| json!({}));
    debug!(provider = %selector, payload = %payload, "/generate payload");

    let request = match serde_json::from_value::<GenerateRequest>(payload) {
        Ok(request) => request.into_chat_request(),
        Err(e) => {
            let err = DispatchError::Internal(format!("invalid request body: {e}"));
            return reply(err.status_code(), err.to_body());
        }
    };

    let outcome = state.dispatcher.dispatch(&selector, &request).await;
    info!(provider = %selector, status = outcome.status, "/generate completed");
    reply(outcome.status, outcome.body)
}

fn reply(status: u16, body: Value) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(body)).into_response()
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Mutex;
    use tiger_core::types::{ChatMessage, ChatRequest};
    use tiger_providers::DispatchOutcome;
    use tower::ServiceExt;

    /// Records what it was asked and answers with a canned outcome.
    struct StubDispatcher {
        outcome: DispatchOutcome,
        calls: Mutex<Vec<(String, ChatRequest)>>,
    }

    impl StubDispatcher {
        fn answering(status: u16, body: Value) -> Arc<Self> {
            Arc::new(Self {
                outcome: DispatchOutcome { status, body },
                calls: Mutex::new(Vec::new()),
            })
        }

        fn last_call(&self) -> (String, ChatRequest) {
            self.calls.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl ChatDispatcher for StubDispatcher {
        async fn dispatch(&self, selector: &str, request: &ChatRequest) -> DispatchOutcome {
            self.calls
                .lock()
                .unwrap()
                .push((selector.to_string(), request.clone()));
            self.outcome.clone()
        }
    }

    fn app(stub: &Arc<StubDispatcher>) -> Router {
        router(AppState {
            dispatcher: stub.clone(),
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, request).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_generate(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn ok_stub() -> Arc<StubDispatcher> {
        StubDispatcher::answering(200, json!({"response": "hi", "raw": {}}))
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send_json(app(&ok_stub()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_api_info() {
        let request = Request::get("/api").body(Body::empty()).unwrap();
        let (status, body) = send_json(app(&ok_stub()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"status": "running", "message": "Welcome to my-ai-tiger"})
        );
    }

    #[tokio::test]
    async fn test_index_page() {
        let request = Request::get("/").body(Body::empty()).unwrap();
        let (status, bytes) = send(app(&ok_stub()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(bytes).unwrap().contains("<title>my-ai-tiger</title>"));
    }

    #[tokio::test]
    async fn test_generate_defaults_to_groq() {
        let stub = ok_stub();
        let (status, body) =
            send_json(app(&stub), post_generate("/generate", r#"{"prompt":"Hello"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "hi");

        let (selector, request) = stub.last_call();
        assert_eq!(selector, "groq");
        assert_eq!(request.messages, vec![ChatMessage::user("Hello")]);
        assert_eq!(request.max_tokens, 512);
    }

    #[tokio::test]
    async fn test_query_selects_provider() {
        let stub = ok_stub();
        send_json(app(&stub), post_generate("/generate?provider=DeepSeek", "{}")).await;
        assert_eq!(stub.last_call().0, "deepseek");
    }

    #[tokio::test]
    async fn test_repeated_query_provider_takes_first() {
        let stub = ok_stub();
        let (status, _) = send_json(
            app(&stub),
            post_generate("/generate?provider=deepseek&provider=groq", r#"{"prompt":"x"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(stub.last_call().0, "deepseek");
    }

    #[tokio::test]
    async fn test_unrelated_query_keys_are_ignored() {
        let stub = ok_stub();
        send_json(app(&stub), post_generate("/generate?debug=1&provider=groq", "{}")).await;
        assert_eq!(stub.last_call().0, "groq");
    }

    #[tokio::test]
    async fn test_header_wins_over_query() {
        let stub = ok_stub();
        let request = Request::post("/generate?provider=deepseek")
            .header("X-Provider", "OpenRouter")
            .body(Body::from(r#"{"prompt":"x"}"#))
            .unwrap();
        send_json(app(&stub), request).await;
        assert_eq!(stub.last_call().0, "openrouter");
    }

    #[tokio::test]
    async fn test_unknown_provider_is_forwarded_verbatim() {
        // Fallback to OpenRouter happens in the dispatcher, not here.
        let stub = ok_stub();
        send_json(app(&stub), post_generate("/generate?provider=mistral", "{}")).await;
        assert_eq!(stub.last_call().0, "mistral");
    }

    #[tokio::test]
    async fn test_messages_and_overrides_are_passed_on() {
        let stub = ok_stub();
        let body = r#"{
            "messages": [{"role": "system", "content": "Be brief."}, {"role": "user", "content": "Hi"}],
            "model": "deepseek-reasoner",
            "max_tokens": 100,
            "temperature": 0.3
        }"#;
        send_json(app(&stub), post_generate("/generate", body)).await;

        let (_, request) = stub.last_call();
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.model.as_deref(), Some("deepseek-reasoner"));
        assert_eq!(request.max_tokens, 100);
        assert_eq!(request.temperature, 0.3);
    }

    #[tokio::test]
    async fn test_non_json_body_is_empty_prompt() {
        let stub = ok_stub();
        let request = Request::post("/generate")
            .header("content-type", "text/plain")
            .body(Body::from("just some text"))
            .unwrap();
        let (status, _) = send_json(app(&stub), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(stub.last_call().1.messages, vec![ChatMessage::user("")]);
    }

    #[tokio::test]
    async fn test_malformed_fields_are_internal_error() {
        let stub = ok_stub();
        let (status, body) =
            send_json(app(&stub), post_generate("/generate", r#"{"max_tokens":"many"}"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal_error");
        assert!(stub.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_status_is_propagated() {
        let stub = StubDispatcher::answering(
            429,
            json!({"error": "upstream_error", "details": {"error": "rate limited"}}),
        );
        let (status, body) =
            send_json(app(&stub), post_generate("/generate", r#"{"prompt":"x"}"#)).await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["details"]["error"], "rate limited");
    }
}
