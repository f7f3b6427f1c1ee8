//! Configuration module for Snakk.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{
    AgentSettings, CheckpointSettings, GeneralSettings, ModelSettings, Settings,
    StoreProvider,
};
