use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::ingest::types::{ForecastRequest, ForecastResponse, ForecastSource};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP-backed forecast source for the Open-Meteo `/v1/forecast` endpoint.
pub struct OpenMeteoProvider {
    url: String,
    client: Client,
}

impl OpenMeteoProvider {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("weather-collector/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("building forecast http client")?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoProvider {
    async fn fetch_forecast(&self, request: &ForecastRequest) -> Result<ForecastResponse> {
        let rsp = self
            .client
            .get(&self.url)
            .query(&request.query_pairs())
            .send()
            .await
            .context("forecast http get()")?;

        let status = rsp.status();
        if !status.is_success() {
            return Err(anyhow!("forecast api returned HTTP {status}"));
        }

        let body = rsp.text().await.context("forecast http .text()")?;
        serde_json::from_str(&body).context("decoding forecast json")
    }

    fn name(&self) -> &'static str {
        "Open-Meteo"
    }
}
