//! Provider dispatcher for the three OpenAI-compatible upstreams.
//!
//! One `Dispatcher` is built at startup from the immutable provider config.
//! Every call resolves the selector to a [`ProviderProfile`], checks the key,
//! makes exactly one POST to `/chat/completions` and normalizes the result.
//! Nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use tiger_core::config::{ProviderConfig, ProvidersConfig};
use tiger_core::types::{ChatCompletionRequest, ChatRequest};

use crate::error::DispatchError;
use crate::registry::{selector_position, ProviderSpec, PROVIDERS};
use crate::reply::extract_content;
use crate::traits::{ChatDispatcher, DispatchOutcome};

/// Upper bound on one upstream call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// ─────────────────────────────────────────────
// ProviderProfile
// ─────────────────────────────────────────────

/// A provider spec merged with its runtime configuration.
#[derive(Clone)]
pub struct ProviderProfile {
    spec: &'static ProviderSpec,
    api_base: String,
    api_key: Option<String>,
    default_model: String,
}

impl std::fmt::Debug for ProviderProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderProfile")
            .field("provider", &self.spec.display_name)
            .field("api_base", &self.api_base)
            .field("default_model", &self.default_model)
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl ProviderProfile {
    /// Resolve base URL, key and default model: config > spec default.
    pub fn new(spec: &'static ProviderSpec, config: &ProviderConfig) -> Self {
        let api_base = config
            .api_base
            .clone()
            .unwrap_or_else(|| spec.default_api_base.to_string());

        let api_key = config
            .is_configured()
            .then(|| config.api_key.trim().to_string());

        let default_model = config
            .model
            .clone()
            .unwrap_or_else(|| spec.default_model.to_string());

        ProviderProfile {
            spec,
            api_base,
            api_key,
            default_model,
        }
    }

    pub fn spec(&self) -> &'static ProviderSpec {
        self.spec
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build the full chat completions URL.
    pub fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }
}

// ─────────────────────────────────────────────
// Dispatcher
// ─────────────────────────────────────────────

/// Successful `/generate` answer: the extracted reply and the untouched upstream body.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerateReply {
    pub response: Option<String>,
    pub raw: Value,
}

/// Routes chat requests to the configured providers.
pub struct Dispatcher {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// One profile per entry of [`PROVIDERS`], same order.
    profiles: [ProviderProfile; 3],
}

impl Dispatcher {
    /// Build the dispatcher from the provider section of the config.
    pub fn new(config: &ProvidersConfig) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let default_config = ProviderConfig::default();
        let profiles = PROVIDERS.map(|spec| {
            let provider_config = config.get_by_name(spec.name).unwrap_or(&default_config);
            ProviderProfile::new(spec, provider_config)
        });

        Ok(Dispatcher { client, profiles })
    }

    /// All profiles, in registry order.
    pub fn profiles(&self) -> &[ProviderProfile] {
        &self.profiles
    }

    /// Profile a selector resolves to (unknown selectors → OpenRouter).
    pub fn profile(&self, selector: &str) -> &ProviderProfile {
        &self.profiles[selector_position(selector)]
    }

    /// Forward one request and extract the reply.
    pub async fn generate(
        &self,
        selector: &str,
        request: &ChatRequest,
    ) -> Result<GenerateReply, DispatchError> {
        let profile = self.profile(selector);
        let api_key = profile.api_key.as_deref().ok_or(DispatchError::NotConfigured {
            env_key: profile.spec.env_key,
        })?;

        let model = request
            .model
            .as_deref()
            .unwrap_or(profile.default_model.as_str());

        debug!(
            provider = profile.spec.display_name,
            model = %model,
            messages = request.messages.len(),
            max_tokens = request.max_tokens,
            "Calling upstream"
        );

        let body = ChatCompletionRequest {
            model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let mut builder = self
            .client
            .post(profile.completions_url())
            .bearer_auth(api_key)
            .json(&body);
        for (name, value) in profile.spec.extra_headers {
            builder = builder.header(*name, *value);
        }

        let response = builder.send().await.map_err(|e| {
            error!(provider = profile.spec.display_name, error = %e, "HTTP request failed");
            DispatchError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await?;
        debug!(
            provider = profile.spec.display_name,
            status = %status,
            body = %truncate(&text, 500),
            "Upstream responded"
        );

        if !status.is_success() {
            warn!(
                provider = profile.spec.display_name,
                status = %status,
                "Upstream returned an error"
            );
            return Err(DispatchError::upstream(status.as_u16(), &text));
        }

        let raw: Value = serde_json::from_str(&text).map_err(|e| {
            error!(provider = profile.spec.display_name, error = %e, "Failed to parse upstream response");
            DispatchError::Internal(format!("invalid JSON from upstream: {e}"))
        })?;

        Ok(GenerateReply {
            response: extract_content(&raw),
            raw,
        })
    }
}

#[async_trait]
impl ChatDispatcher for Dispatcher {
    async fn dispatch(&self, selector: &str, request: &ChatRequest) -> DispatchOutcome {
        match self.generate(selector, request).await {
            Ok(reply) => DispatchOutcome {
                status: 200,
                body: json!({ "response": reply.response, "raw": reply.raw }),
            },
            Err(e) => DispatchOutcome {
                status: e.status_code(),
                body: e.to_body(),
            },
        }
    }
}

/// Cut a log preview to `max_len` characters.
fn truncate(s: &str, max_len: usize) -> &str {
    match s.char_indices().nth(max_len) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
