//! Doctor command - verify system requirements and configuration.

use super::open_store;
use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
struct CheckResult {
    name: String,
    ok: bool,
    message: String,
    hint: Option<String>,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            ok: true,
            message: message.to_string(),
            hint: None,
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            ok: false,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = if self.ok {
            style("✓").green()
        } else {
            style("✗").red()
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Snakk Doctor");
    println!();

    let mut checks = Vec::new();

    checks.push(match preflight::check_api_key() {
        Ok(()) => CheckResult::ok("OPENAI_API_KEY", "set"),
        Err(e) => CheckResult::error(
            "OPENAI_API_KEY",
            &e.to_string(),
            "export OPENAI_API_KEY='sk-...'",
        ),
    });

    let config_path = Settings::default_config_path();
    checks.push(if config_path.exists() {
        CheckResult::ok("Config", &format!("{}", config_path.display()))
    } else {
        CheckResult::ok("Config", "using defaults (no config file)")
    });

    checks.push(match open_store(settings) {
        Ok(store) => match store.list().await {
            Ok(threads) => CheckResult::ok(
                "Checkpoint store",
                &format!("{:?}, {} thread(s)", settings.checkpoint.provider, threads.len()),
            ),
            Err(e) => CheckResult::error(
                "Checkpoint store",
                &e.to_string(),
                "check the [checkpoint] section of your config",
            ),
        },
        Err(e) => CheckResult::error(
            "Checkpoint store",
            &e.to_string(),
            "check the [checkpoint] section of your config",
        ),
    });

    for check in &checks {
        check.print();
    }

    println!();
    if checks.iter().all(|c| c.ok) {
        Output::success("All checks passed.");
    } else {
        Output::warning("Some checks failed. See hints above.");
    }

    Ok(())
}
