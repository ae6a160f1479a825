//! Provider registry — static specs for the three supported upstreams.
//!
//! Each `ProviderSpec` describes how to reach one OpenAI-compatible
//! chat-completions service: base URL, env var for the key, default model
//! and any fixed headers the service wants.

// ─────────────────────────────────────────────
// ProviderSpec — static metadata for one provider
// ─────────────────────────────────────────────

/// Static specification describing one upstream provider.
#[derive(Clone, Debug)]
pub struct ProviderSpec {
    /// Internal name, also the selector value (e.g. `"groq"`).
    pub name: &'static str,
    /// Human-readable name for logs. E.g. `"OpenRouter"`.
    pub display_name: &'static str,
    /// Environment variable holding the API key. E.g. `"GROQ_API_KEY"`.
    pub env_key: &'static str,
    /// API base URL; `/chat/completions` is appended.
    pub default_api_base: &'static str,
    /// Model used when neither the request nor the config names one.
    pub default_model: &'static str,
    /// Headers sent with every request to this provider.
    pub extra_headers: &'static [(&'static str, &'static str)],
}

// ─────────────────────────────────────────────
// The three providers
// ─────────────────────────────────────────────

pub static GROQ: ProviderSpec = ProviderSpec {
    name: "groq",
    display_name: "Groq",
    env_key: "GROQ_API_KEY",
    default_api_base: "https://api.groq.com/openai/v1",
    default_model: "llama-3.1-8b-instant",
    extra_headers: &[],
};

pub static DEEPSEEK: ProviderSpec = ProviderSpec {
    name: "deepseek",
    display_name: "DeepSeek",
    env_key: "DEEPSEEK_API_KEY",
    default_api_base: "https://api.deepseek.com/v1",
    default_model: "deepseek-chat",
    extra_headers: &[],
};

/// OpenRouter — also the fallback for any selector that isn't groq/deepseek.
pub static OPENROUTER: ProviderSpec = ProviderSpec {
    name: "openrouter",
    display_name: "OpenRouter",
    env_key: "OPENROUTER_API_KEY",
    default_api_base: "https://openrouter.ai/api/v1",
    default_model: "meta-llama/llama-3.2-1b-instruct",
    // OpenRouter attribution headers
    extra_headers: &[
        ("HTTP-Referer", "https://your-service.com"),
        ("X-Title", "AI Microservice"),
    ],
};

/// All supported provider specifications.
pub static PROVIDERS: [&ProviderSpec; 3] = [&GROQ, &DEEPSEEK, &OPENROUTER];

/// Selector used when a request names no provider.
pub const DEFAULT_SELECTOR: &str = "groq";

// ─────────────────────────────────────────────
// Matching functions
// ─────────────────────────────────────────────

/// Position in [`PROVIDERS`] of the provider a request's selector names.
///
/// Case-insensitive. Anything that isn't `groq` or `deepseek`, including
/// unknown strings, lands on OpenRouter.
pub fn selector_position(selector: &str) -> usize {
    match selector.to_lowercase().as_str() {
        "groq" => 0,
        "deepseek" => 1,
        _ => 2,
    }
}

/// Resolve a request's provider selector to a spec.
pub fn resolve_selector(selector: &str) -> &'static ProviderSpec {
    PROVIDERS[selector_position(selector)]
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
