//! CLI module for Snakk.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Snakk - Tool-Calling Agent CLI
///
/// A CLI for durable, tool-using conversations with OpenAI-compatible models.
/// The name "Snakk" comes from the Norwegian word for "talk."
#[derive(Parser, Debug)]
#[command(name = "snakk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Thread ID to resume (a new thread is created if omitted)
        #[arg(short, long)]
        thread: Option<String>,

        /// Chat model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Send a single message and print the final answer
    Send {
        /// The message to send
        message: String,

        /// Thread ID to send on (a new thread is created if omitted)
        #[arg(short, long)]
        thread: Option<String>,

        /// Chat model to use
        #[arg(short, long)]
        model: Option<String>,

        /// JSON Schema the final answer must satisfy (inline JSON)
        #[arg(long)]
        schema: Option<String>,
    },

    /// Inspect stored conversation threads
    Threads {
        #[command(subcommand)]
        action: Option<ThreadsAction>,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ThreadsAction {
    /// List stored threads (default)
    List,

    /// Print a thread's conversation
    Show {
        /// Thread ID to show
        thread_id: String,
    },

    /// Delete a thread
    Delete {
        /// Thread ID to delete
        thread_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "model.model")
        key: String,
        /// Configuration value
        value: String,
    },

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
