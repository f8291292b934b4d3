// src/config/mod.rs
pub mod settings;

pub use settings::{PipelineMode, Settings, POLL_INTERVAL};
