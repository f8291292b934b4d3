// src/pipeline.rs
//! One tick: fetch → (analyze) → publish.

use crate::analyze;
use crate::config::{PipelineMode, Settings};
use crate::ingest::{self, types::ForecastSource};
use crate::notify::QueuePublisher;
use crate::payload::Payload;

/// How a single tick ended. Every variant is non-fatal; the next tick runs regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Published,
    PublishFailed,
    FetchFailed,
    /// Forecast arrived without a `current` block, nothing to classify.
    NoInsight,
}

pub struct Collector {
    settings: Settings,
    source: Box<dyn ForecastSource>,
    publisher: QueuePublisher,
}

impl Collector {
    pub fn new(settings: Settings, source: Box<dyn ForecastSource>, publisher: QueuePublisher) -> Self {
        Self {
            settings,
            source,
            publisher,
        }
    }

    pub async fn run_once(&self) -> TickOutcome {
        let payload = match self.build_payload().await {
            Ok(p) => p,
            Err(outcome) => return outcome,
        };

        let summary = payload.summary();
        if self.publisher.publish(&payload).await {
            tracing::info!(mode = self.settings.mode.as_str(), %summary, "tick published");
            TickOutcome::Published
        } else {
            tracing::warn!(mode = self.settings.mode.as_str(), %summary, "tick not published");
            TickOutcome::PublishFailed
        }
    }

    async fn build_payload(&self) -> Result<Payload, TickOutcome> {
        let source = self.source.as_ref();
        match self.settings.mode {
            PipelineMode::Flat => ingest::fetch(source, &self.settings)
                .await
                .map(Payload::from)
                .ok_or(TickOutcome::FetchFailed),
            PipelineMode::Insight => {
                let raw = ingest::fetch_current(source, &self.settings)
                    .await
                    .ok_or(TickOutcome::FetchFailed)?;
                match analyze::analyze(Some(&raw), &self.settings) {
                    Some(enriched) => Ok(enriched.into()),
                    None => {
                        tracing::warn!(provider = source.name(), "forecast had no current block");
                        Err(TickOutcome::NoInsight)
                    }
                }
            }
        }
    }
}
