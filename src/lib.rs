// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod analyze;
pub mod config;
pub mod ingest;
pub mod notify;
pub mod payload;
pub mod pipeline;

// ---- Re-exports for stable public API ----
pub use crate::config::{PipelineMode, Settings};
pub use crate::notify::QueuePublisher;
pub use crate::payload::{EnrichedPayload, FlatWeatherPayload, Payload, Severity};
pub use crate::pipeline::{Collector, TickOutcome};
