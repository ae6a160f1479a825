//! Config loader — optional JSON file plus environment variables.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file given explicitly or via `TIGER_CONFIG`
//! 3. Environment variables (override JSON):
//!    `<NAME>_API_KEY`, `<NAME>_MODEL`, `<NAME>_API_BASE` for
//!    `GROQ`, `DEEPSEEK`, `OPENROUTER`; `HOST`, `PORT`; `TIGER_SPEECH_VOICE`.
//!
//! A `.env` file in the working directory is loaded into the process
//! environment by [`load_dotenv`] before any of the above is read.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{Config, ProviderConfig};

/// Env var naming an optional JSON config file.
pub const CONFIG_PATH_ENV: &str = "TIGER_CONFIG";

/// Registry name → env var prefix.
const PROVIDER_ENV_PREFIXES: &[(&str, &str)] = &[
    ("groq", "GROQ"),
    ("deepseek", "DEEPSEEK"),
    ("openrouter", "OPENROUTER"),
];

/// Load `.env` from the working directory, if there is one.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Failed to load .env file: {}", e),
    }
}

/// Config file path from `TIGER_CONFIG`, if set.
pub fn config_path_from_env() -> Option<PathBuf> {
    std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
}

/// Load configuration from an optional file + env vars.
///
/// Falls back to defaults if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let file_config = match path.map(PathBuf::from).or_else(config_path_from_env) {
        Some(path) => load_config_file(&path),
        None => Config::default(),
    };

    apply_env_overrides(file_config)
}

/// Read a JSON config file. Never fails: problems are logged and defaults used.
fn load_config_file(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            Config::default()
        }
    }
}

/// Apply overrides from the real process environment.
fn apply_env_overrides(config: Config) -> Config {
    apply_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply environment-style overrides using `lookup` as the variable source.
pub fn apply_overrides_from<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    for (name, prefix) in PROVIDER_ENV_PREFIXES {
        if let Some(provider) = config.providers.get_by_name_mut(name) {
            apply_provider_env(provider, prefix, &lookup);
        }
    }

    if let Some(val) = lookup("HOST").filter(|v| !v.is_empty()) {
        config.server.host = val;
    }
    if let Some(val) = lookup("PORT") {
        match val.trim().parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(_) => warn!("Ignoring invalid PORT value: {}", val),
        }
    }

    if let Some(val) = lookup("TIGER_SPEECH_VOICE").filter(|v| !v.is_empty()) {
        config.speech.voice = val;
    }

    config
}

/// Apply env var overrides for a single provider.
fn apply_provider_env<F>(provider: &mut ProviderConfig, prefix: &str, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    // An empty key is still an override: it leaves the provider unconfigured.
    if let Some(val) = lookup(&format!("{prefix}_API_KEY")) {
        provider.api_key = val;
    }
    if let Some(val) = lookup(&format!("{prefix}_MODEL")).filter(|v| !v.trim().is_empty()) {
        provider.model = Some(val);
    }
    if let Some(val) = lookup(&format!("{prefix}_API_BASE")).filter(|v| !v.trim().is_empty()) {
        provider.api_base = Some(val);
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
