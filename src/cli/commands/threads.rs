//! Threads command implementation.

use super::open_store;
use crate::cli::{Output, ThreadsAction};
use crate::config::Settings;
use crate::conversation::Role;
use console::style;

/// Run the threads command.
pub async fn run_threads(action: Option<&ThreadsAction>, settings: Settings) -> anyhow::Result<()> {
    let store = open_store(&settings)?;

    match action.unwrap_or(&ThreadsAction::List) {
        ThreadsAction::List => {
            let threads = store.list().await?;

            if threads.is_empty() {
                Output::info("No threads stored yet. Use 'snakk chat' or 'snakk send' to start one.");
            } else {
                Output::header(&format!("Stored Threads ({})", threads.len()));
                println!();

                for summary in &threads {
                    Output::thread_info(
                        &summary.id,
                        summary.message_count,
                        summary.llm_calls,
                        summary.updated_at,
                    );
                }

                let total_messages: usize = threads.iter().map(|t| t.message_count).sum();
                println!();
                Output::kv("Total threads", &threads.len().to_string());
                Output::kv("Total messages", &total_messages.to_string());
            }
        }

        ThreadsAction::Show { thread_id } => match store.load(thread_id).await? {
            Some(thread) => {
                Output::header(&format!("Thread {}", thread.id));
                Output::kv("Model calls", &thread.llm_calls.to_string());
                Output::kv("Created", &thread.created_at.format("%Y-%m-%d %H:%M").to_string());
                println!();

                for message in &thread.messages {
                    let label = match message.role {
                        Role::System => style("system").dim(),
                        Role::User => style("user").green(),
                        Role::Assistant => style("assistant").cyan(),
                        Role::Tool => style("tool").yellow(),
                    };

                    if message.has_tool_calls() {
                        let calls: Vec<String> = message
                            .tool_calls
                            .iter()
                            .map(|c| format!("{}({})", c.name, c.arguments))
                            .collect();
                        println!("[{}] requested: {}", label, calls.join(", "));
                    } else {
                        println!("[{}] {}", label, message.content);
                    }
                }
            }
            None => {
                Output::error(&format!("No thread found with id {}", thread_id));
            }
        },

        ThreadsAction::Delete { thread_id } => {
            if store.delete(thread_id).await? {
                Output::success(&format!("Deleted thread {}", thread_id));
            } else {
                Output::info(&format!("No thread found with id {}", thread_id));
            }
        }
    }

    Ok(())
}
