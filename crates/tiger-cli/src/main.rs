//! my-ai-tiger CLI — entry point.
//!
//! # Commands
//!
//! - `tiger serve [--config PATH] [--port PORT] [--logs]` — run the HTTP gateway
//! - `tiger status [--config PATH]` — show configuration and provider status

mod helpers;
mod routes;
mod server;
mod status;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use tiger_core::config::{load_config, load_dotenv};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// 🐯 my-ai-tiger — one endpoint, several chat-completion providers
#[derive(Parser)]
#[command(name = "tiger", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway
    Serve {
        /// JSON config file (defaults to $TIGER_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Listen port, overrides config and $PORT
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Show configuration and provider status
    Status {
        /// JSON config file (defaults to $TIGER_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

// ─────────────────────────────────────────────
// Entry point
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    load_dotenv();

    match cli.command {
        Commands::Serve { config, port, logs } => {
            init_logging(logs);
            let mut config = load_config(config.as_deref());
            if let Some(port) = port {
                config.server.port = port;
            }
            server::run(config).await
        }
        Commands::Status { config: path } => {
            let config = load_config(path.as_deref());
            status::run(&config, path.as_deref())
        }
    }
}

/// Initialize tracing. `RUST_LOG` wins over `--logs`.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("tiger_cli=debug,tiger_providers=debug,tiger_core=debug,info")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_serve_flags() {
        let cli = Cli::try_parse_from(["tiger", "serve", "--port", "9000", "--logs"]).unwrap();
        match cli.command {
            Commands::Serve { config, port, logs } => {
                assert!(config.is_none());
                assert_eq!(port, Some(9000));
                assert!(logs);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn parse_status_with_config() {
        let cli = Cli::try_parse_from(["tiger", "status", "-c", "tiger.json"]).unwrap();
        match cli.command {
            Commands::Status { config } => {
                assert_eq!(config, Some(PathBuf::from("tiger.json")));
            }
            _ => panic!("expected status"),
        }
    }
}
