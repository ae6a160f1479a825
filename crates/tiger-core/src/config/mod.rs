//! Configuration system — schema, loading, and env var overrides.
//!
//! # Usage
//! ```no_run
//! use tiger_core::config;
//!
//! let cfg = config::load_config(None);
//! println!("Port: {}", cfg.server.port);
//! ```

pub mod loader;
pub mod schema;

// Re-export key types
pub use loader::{config_path_from_env, load_config, load_dotenv};
pub use schema::{Config, ProviderConfig, ProvidersConfig, ServerConfig, SpeechConfig};
