//! Interactive chat command.

use super::build_runner;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the interactive chat command.
pub async fn run_chat(
    thread: Option<String>,
    model: Option<String>,
    settings: Settings,
) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Chat) {
        Output::error(&format!("{}", e));
        Output::info("Run 'snakk doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let runner = build_runner(&settings, model.as_deref())?;

    let mut thread_id = match thread {
        Some(id) => id,
        None => runner.create_thread().await?,
    };

    println!("\n{}", style("Snakk Chat").bold().cyan());
    println!("{}", style(format!("Thread: {}", thread_id)).dim());
    println!(
        "{}\n",
        style("Type your messages, or 'exit' to quit. Use 'new' to start a fresh thread.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info(&format!("Goodbye! Resume with: snakk chat --thread {}", thread_id));
            break;
        }

        if input.eq_ignore_ascii_case("new") {
            thread_id = runner.create_thread().await?;
            Output::info(&format!("Started new thread {}", thread_id));
            continue;
        }

        let spinner = Output::spinner("Thinking...");
        let result = runner.send(&thread_id, input).await;
        spinner.finish_and_clear();

        match result {
            Ok(outcome) => {
                for record in &outcome.tool_calls {
                    Output::tool_call(&record.name, record.ok);
                }
                println!("\n{} {}\n", style("Snakk:").cyan().bold(), outcome.content);
            }
            Err(e) => {
                Output::error(&format!("Error: {}", e));
            }
        }
    }

    Ok(())
}
