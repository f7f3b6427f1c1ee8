//! One-shot send command.

use super::build_runner;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::gateway::OutputSchema;

/// Run the send command.
pub async fn run_send(
    message: &str,
    thread: Option<String>,
    model: Option<String>,
    schema: Option<String>,
    settings: Settings,
) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Send) {
        Output::error(&format!("{}", e));
        Output::info("Run 'snakk doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let runner = build_runner(&settings, model.as_deref())?;

    let (thread_id, created) = match thread {
        Some(id) => (id, false),
        None => (runner.create_thread().await?, true),
    };

    let spinner = Output::spinner("Thinking...");
    let result = match &schema {
        Some(raw) => {
            let value: serde_json::Value = serde_json::from_str(raw)
                .map_err(|e| anyhow::anyhow!("--schema is not valid JSON: {}", e))?;
            let output_schema = OutputSchema::new("response", value);
            runner
                .send_structured(&thread_id, message, &output_schema)
                .await
        }
        None => runner.send(&thread_id, message).await,
    };
    spinner.finish_and_clear();

    let outcome = result?;

    for record in &outcome.tool_calls {
        Output::tool_call(&record.name, record.ok);
    }

    match outcome.structured {
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        None => println!("{}", outcome.content),
    }

    if created {
        println!();
        Output::info(&format!(
            "Continue this conversation with: snakk send --thread {} \"...\"",
            thread_id
        ));
    }

    Ok(())
}
