// src/analyze/mod.rs
pub mod rules;

use chrono::Utc;

use crate::config::Settings;
use crate::ingest::types::ForecastResponse;
use crate::payload::{AiAnalysis, EnrichedPayload, Location, Metadata, SensorData};

pub use rules::{classify, Insight, Reading};

pub const SOURCE_LABEL: &str = "Open-Meteo";

/// Build the enriched payload from a raw forecast.
/// Returns `None` when there is no response or it carries no `current` block.
/// Temperature, humidity and weather code default to 0 when absent.
pub fn analyze(response: Option<&ForecastResponse>, settings: &Settings) -> Option<EnrichedPayload> {
    let current = response?.current.as_ref()?;

    let reading = Reading {
        temperature: current.temperature_2m.unwrap_or(0.0),
        humidity: current.relative_humidity_2m.unwrap_or(0.0),
        weather_code: current.weather_code.unwrap_or(0),
    };
    let insight = classify(&reading);

    Some(EnrichedPayload {
        sensor_data: SensorData {
            temperature: reading.temperature,
            humidity: reading.humidity,
            wind_speed: current.wind_speed_10m,
            condition_code: reading.weather_code,
            time: current.time.clone(),
        },
        ai_analysis: AiAnalysis {
            insight: insight.message.to_string(),
            severity: insight.severity,
        },
        metadata: Metadata {
            source: SOURCE_LABEL.to_string(),
            city: settings.city_name.clone(),
            location: Location {
                lat: settings.city_lat.clone(),
                lon: settings.city_lon.clone(),
            },
            timestamp: epoch_seconds_now(),
        },
    })
}

fn epoch_seconds_now() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
