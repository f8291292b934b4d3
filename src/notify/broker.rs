// src/notify/broker.rs
use anyhow::Result;
use async_trait::async_trait;

/// Opens one broker connection (with a channel on it).
#[async_trait]
pub trait BrokerConnector: Send + Sync {
    async fn connect(&self, url: &str) -> Result<Box<dyn BrokerChannel>>;
}

/// Operations the publisher needs on an open channel.
#[async_trait]
pub trait BrokerChannel: Send {
    /// Idempotent when the queue already exists with the same durability.
    async fn declare_queue(&mut self, name: &str, durable: bool) -> Result<()>;

    async fn publish(
        &mut self,
        exchange: &str,
        routing_key: &str,
        body: &[u8],
        persistent: bool,
    ) -> Result<()>;

    /// Closes the underlying connection.
    async fn close(&mut self) -> Result<()>;
}
