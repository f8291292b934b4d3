// src/notify/mod.rs
pub mod broker;
pub mod rabbitmq;

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::Settings;
pub use broker::{BrokerChannel, BrokerConnector};
pub use rabbitmq::LapinConnector;

/// Default (nameless) exchange; routes by queue name.
pub const DEFAULT_EXCHANGE: &str = "";

/// Publishes one JSON message per call to a durable queue.
/// No pooling: each call opens and closes its own connection.
#[derive(Clone)]
pub struct QueuePublisher {
    url: String,
    queue: String,
    connector: Arc<dyn BrokerConnector>,
}

impl QueuePublisher {
    pub fn new(settings: &Settings) -> Self {
        Self::with_connector(settings, Arc::new(LapinConnector))
    }

    pub fn with_connector(settings: &Settings, connector: Arc<dyn BrokerConnector>) -> Self {
        Self {
            url: settings.rabbitmq_url.clone(),
            queue: settings.queue_name.clone(),
            connector,
        }
    }

    /// `true` only when connect, declare, serialize and publish all succeeded.
    /// Failures are logged here and never returned.
    pub async fn publish<T>(&self, payload: &T) -> bool
    where
        T: Serialize + ?Sized + Sync,
    {
        match self.try_publish(payload).await {
            Ok(bytes) => {
                tracing::info!(queue = %self.queue, bytes, "payload published");
                true
            }
            Err(e) => {
                tracing::error!(error = ?e, queue = %self.queue, "publish failed");
                false
            }
        }
    }

    async fn try_publish<T>(&self, payload: &T) -> Result<usize>
    where
        T: Serialize + ?Sized + Sync,
    {
        let mut channel = self
            .connector
            .connect(&self.url)
            .await
            .context("connecting to broker")?;

        let outcome = self.send(&mut *channel, payload).await;

        if let Err(e) = channel.close().await {
            tracing::warn!(error = ?e, queue = %self.queue, "closing broker connection failed");
        }
        outcome
    }

    async fn send<T>(&self, channel: &mut dyn BrokerChannel, payload: &T) -> Result<usize>
    where
        T: Serialize + ?Sized + Sync,
    {
        channel.declare_queue(&self.queue, true).await?;
        let body = serde_json::to_vec(payload).context("serializing payload")?;
        channel
            .publish(DEFAULT_EXCHANGE, &self.queue, &body, true)
            .await?;
        Ok(body.len())
    }
}
