//! `tiger status` — show configuration and provider status.
//!
//! - Shows config file, listen address and speech voice
//! - Shows key status, base URL and default model for each provider

use anyhow::Result;
use colored::Colorize;

use tiger_core::config::{config_path_from_env, Config, ProviderConfig};
use tiger_providers::{ProviderProfile, PROVIDERS};

/// Run the status command.
pub fn run(config: &Config, config_path: Option<&std::path::Path>) -> Result<()> {
    println!();
    println!("{}", "🐯 my-ai-tiger status".yellow().bold());
    println!();

    // Config
    let env_path = config_path_from_env();
    let path = config_path.or(env_path.as_deref());
    let config_line = match path {
        Some(p) if p.exists() => format!("{} {}", p.display(), "✓".green()),
        Some(p) => format!("{} {}", p.display(), "(not found)".red()),
        None => format!("{}", "(environment only)".dimmed()),
    };
    println!("  {:<18} {}", "Config:".bold(), config_line);
    println!("  {:<18} {}", "Listen:".bold(), config.server.bind_addr());
    println!("  {:<18} {}", "Speech voice:".bold(), config.speech.voice);

    // Providers
    println!();
    println!("  {}", "Providers:".bold());
    let fallback = ProviderConfig::default();
    for spec in PROVIDERS {
        let provider_config = config.providers.get_by_name(spec.name).unwrap_or(&fallback);
        let profile = ProviderProfile::new(spec, provider_config);

        let key_status = if provider_config.is_configured() {
            format!("{} (key set)", "✓".green())
        } else {
            format!("{} {}", "·".dimmed(), format!("{} not set", spec.env_key).dimmed())
        };
        println!("    {:<12} {}", spec.display_name, key_status);
        println!(
            "    {:<12} {} {}",
            "",
            profile.completions_url().dimmed(),
            format!("[{}]", profile.default_model()).dimmed()
        );
    }
    println!(
        "\n  {}",
        "Unknown provider selectors are routed to OpenRouter.".dimmed()
    );
    println!();

    Ok(())
}
