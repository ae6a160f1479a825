//! Shared CLI helpers.

use colored::Colorize;

/// Print the banner shown when the gateway starts.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "🐯 my-ai-tiger".yellow().bold(), version.dimmed());
    println!("{}", "Chat-completion gateway: groq · deepseek · openrouter".dimmed());
    println!();
}
