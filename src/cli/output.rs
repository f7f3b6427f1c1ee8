//! CLI output formatting utilities.

use chrono::{DateTime, Utc};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Print thread summary info.
    pub fn thread_info(id: &str, messages: usize, llm_calls: u64, updated_at: DateTime<Utc>) {
        println!(
            "  {} {} ({} messages, {} model calls, updated {})",
            style("*").cyan(),
            style(id).bold(),
            messages,
            llm_calls,
            updated_at.format("%Y-%m-%d %H:%M")
        );
    }

    /// Print a tool call marker with its outcome.
    pub fn tool_call(name: &str, ok: bool) {
        let marker = if ok {
            style("✓").green()
        } else {
            style("✗").red()
        };
        println!("  {} {}", style(format!("[{}]", name)).dim(), marker);
    }

    /// Start a spinner with the given message. Callers finish it when done.
    pub fn spinner(msg: &str) -> ProgressBar {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(msg.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    }
}
