// src/payload.rs
//! Messages placed on the queue. Built fresh each tick, never mutated afterwards.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: String,
    pub lon: String,
}

/// Legacy flat shape: current conditions plus this hour's rain probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatWeatherPayload {
    pub city: String,
    pub location: Location,
    pub timestamp: Option<String>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub condition_code: Option<i64>,
    pub is_day: Option<u8>,
    pub rain_probability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorData {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: Option<f64>,
    pub condition_code: i64,
    pub time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAnalysis {
    pub insight: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub source: String,
    pub city: String,
    pub location: Location,
    /// Epoch seconds (fractional) at generation time.
    pub timestamp: f64,
}

/// Canonical shape: sensor readings, classification, provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPayload {
    pub sensor_data: SensorData,
    pub ai_analysis: AiAnalysis,
    pub metadata: Metadata,
}

/// Either payload; serializes as the inner shape with no tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Flat(FlatWeatherPayload),
    Enriched(EnrichedPayload),
}

impl Payload {
    /// One-line summary for logs: temperature and timestamp when known.
    pub fn summary(&self) -> String {
        let fmt_temp = |t: Option<f64>| t.map(|v| format!("{v}°C")).unwrap_or_else(|| "?".into());
        match self {
            Payload::Flat(p) => format!(
                "{} | {}",
                fmt_temp(p.temperature),
                p.timestamp.as_deref().unwrap_or("-")
            ),
            Payload::Enriched(p) => format!(
                "{} | {} ({:?})",
                fmt_temp(Some(p.sensor_data.temperature)),
                p.sensor_data.time.as_deref().unwrap_or("-"),
                p.ai_analysis.severity
            ),
        }
    }
}

impl From<FlatWeatherPayload> for Payload {
    fn from(p: FlatWeatherPayload) -> Self {
        Payload::Flat(p)
    }
}

impl From<EnrichedPayload> for Payload {
    fn from(p: EnrichedPayload) -> Self {
        Payload::Enriched(p)
    }
}
