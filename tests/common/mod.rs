//! Shared fakes for integration tests: canned forecast sources and an in-memory broker.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use weather_collector::ingest::types::{ForecastRequest, ForecastResponse, ForecastSource};
use weather_collector::notify::{BrokerChannel, BrokerConnector};

pub const FORECAST_FIXTURE: &str = include_str!("../fixtures/open_meteo_forecast.json");

pub fn fixture_response() -> ForecastResponse {
    serde_json::from_str(FORECAST_FIXTURE).expect("fixture decodes")
}

/// Returns a canned response (or error) and records every request it saw.
pub struct MockSource {
    response: Option<ForecastResponse>,
    pub requests: Arc<Mutex<Vec<ForecastRequest>>>,
}

impl MockSource {
    pub fn ok(response: ForecastResponse) -> Self {
        Self {
            response: Some(response),
            requests: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            requests: Arc::default(),
        }
    }
}

#[async_trait]
impl ForecastSource for MockSource {
    async fn fetch_forecast(&self, request: &ForecastRequest) -> Result<ForecastResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.response
            .clone()
            .ok_or_else(|| anyhow!("HTTP 500 Internal Server Error"))
    }

    fn name(&self) -> &'static str {
        "MockSource"
    }
}

#[derive(Debug, Default)]
pub struct BrokerState {
    /// queue name → durable flag of the first declaration
    pub queues: HashMap<String, bool>,
    pub messages: HashMap<String, VecDeque<Message>>,
    pub connections_opened: usize,
    pub connections_closed: usize,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub body: Vec<u8>,
    pub persistent: bool,
}

/// Broker that keeps queues in memory. Publishing to an undeclared queue fails,
/// like the default exchange dropping an unroutable message.
#[derive(Clone, Default)]
pub struct MemoryBroker {
    pub state: Arc<Mutex<BrokerState>>,
    refuse: bool,
}

impl MemoryBroker {
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    /// Pop the oldest message, like `basic.get` with auto-ack.
    pub fn basic_get(&self, queue: &str) -> Option<Message> {
        self.state
            .lock()
            .unwrap()
            .messages
            .get_mut(queue)
            .and_then(VecDeque::pop_front)
    }

    pub fn durable(&self, queue: &str) -> Option<bool> {
        self.state.lock().unwrap().queues.get(queue).copied()
    }
}

#[async_trait]
impl BrokerConnector for MemoryBroker {
    async fn connect(&self, url: &str) -> Result<Box<dyn BrokerChannel>> {
        if self.refuse {
            return Err(anyhow!("connection refused: {url}"));
        }
        self.state.lock().unwrap().connections_opened += 1;
        Ok(Box::new(MemoryChannel {
            state: self.state.clone(),
        }))
    }
}

struct MemoryChannel {
    state: Arc<Mutex<BrokerState>>,
}

#[async_trait]
impl BrokerChannel for MemoryChannel {
    async fn declare_queue(&mut self, name: &str, durable: bool) -> Result<()> {
        let mut st = self.state.lock().unwrap();
        match st.queues.get(name) {
            Some(existing) if *existing != durable => {
                Err(anyhow!("PRECONDITION_FAILED - inequivalent arg 'durable' for queue '{name}'"))
            }
            Some(_) => Ok(()),
            None => {
                st.queues.insert(name.to_string(), durable);
                st.messages.entry(name.to_string()).or_default();
                Ok(())
            }
        }
    }

    async fn publish(
        &mut self,
        exchange: &str,
        routing_key: &str,
        body: &[u8],
        persistent: bool,
    ) -> Result<()> {
        if !exchange.is_empty() {
            return Err(anyhow!("NOT_FOUND - no exchange '{exchange}'"));
        }
        let mut st = self.state.lock().unwrap();
        let queue = st
            .messages
            .get_mut(routing_key)
            .ok_or_else(|| anyhow!("unroutable: {routing_key}"))?;
        queue.push_back(Message {
            body: body.to_vec(),
            persistent,
        });
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.state.lock().unwrap().connections_closed += 1;
        Ok(())
    }
}
