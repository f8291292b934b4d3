use anyhow::{Context, Result};
use async_trait::async_trait;
use lapin::options::{BasicPublishOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties};

use super::broker::{BrokerChannel, BrokerConnector};

/// AMQP delivery mode 2: message is written to disk by the broker.
const PERSISTENT_DELIVERY: u8 = 2;

/// RabbitMQ connector over lapin. Every `connect` dials a brand-new connection.
#[derive(Debug, Clone, Copy, Default)]
pub struct LapinConnector;

#[async_trait]
impl BrokerConnector for LapinConnector {
    async fn connect(&self, url: &str) -> Result<Box<dyn BrokerChannel>> {
        let connection = Connection::connect(url, ConnectionProperties::default())
            .await
            .context("amqp connect")?;
        let channel = match connection.create_channel().await {
            Ok(ch) => ch,
            Err(e) => {
                let _ = connection.close(200, "channel open failed").await;
                return Err(e).context("amqp create_channel");
            }
        };
        Ok(Box::new(LapinChannel {
            connection,
            channel,
        }))
    }
}

pub struct LapinChannel {
    connection: Connection,
    channel: Channel,
}

#[async_trait]
impl BrokerChannel for LapinChannel {
    async fn declare_queue(&mut self, name: &str, durable: bool) -> Result<()> {
        let options = QueueDeclareOptions {
            durable,
            ..QueueDeclareOptions::default()
        };
        self.channel
            .queue_declare(name, options, FieldTable::default())
            .await
            .with_context(|| format!("declaring queue {name}"))?;
        Ok(())
    }

    async fn publish(
        &mut self,
        exchange: &str,
        routing_key: &str,
        body: &[u8],
        persistent: bool,
    ) -> Result<()> {
        let mut properties = BasicProperties::default();
        if persistent {
            properties = properties.with_delivery_mode(PERSISTENT_DELIVERY);
        }
        self.channel
            .basic_publish(
                exchange,
                routing_key,
                BasicPublishOptions::default(),
                body,
                properties,
            )
            .await
            .context("amqp basic_publish")?
            .await
            .context("amqp publish confirm")?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if self.connection.status().connected() {
            self.connection
                .close(200, "OK")
                .await
                .context("amqp connection close")?;
        }
        Ok(())
    }
}
