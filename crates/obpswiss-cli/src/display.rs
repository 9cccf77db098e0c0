//! Display utilities for the CLI

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", title.bright_white().bold());
    println!("{}", "─".repeat(50).bright_black());
}

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".bright_green(), message);
}

/// Print an error message to stderr
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".bright_red(), message.bright_red());
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "→".bright_blue(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message.yellow());
}

/// Print a labeled value, `N/A` when missing
pub fn labeled(label: &str, value: Option<&str>) {
    let label = format!("{:<14}", format!("{}:", label));
    match value {
        Some(value) => println!("  {} {}", label.bright_white(), value.bright_cyan()),
        None => println!("  {} {}", label.bright_white(), "N/A".bright_black()),
    }
}

/// Print a list entry
pub fn item(primary: &str, secondary: &str) {
    println!("  {} {} - {}", "●".bright_cyan(), primary.bright_white(), secondary);
}

/// Pretty-printed JSON on stdout
pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Stored secrets are never echoed back
pub fn mask(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some("*".repeat(20))
    }
}

/// Spinner on stderr so `--json` output stays clean
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Await `fut` under a spinner, clearing it whatever the outcome
pub async fn with_spinner<T, F>(message: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let pb = spinner(message);
    let result = fut.await;
    pb.finish_and_clear();
    result
}
