// src/ingest/mod.rs
pub mod providers;
pub mod scheduler;
pub mod types;

use chrono::{Local, Timelike};

use crate::config::Settings;
use crate::ingest::types::{ForecastRequest, ForecastResponse, ForecastSource};
use crate::payload::{FlatWeatherPayload, Location};

/// Map a forecast response into the flat payload for the given local hour (0-23).
/// Missing upstream fields become `None`; rain probability falls back to 0.
pub fn flatten(response: &ForecastResponse, settings: &Settings, hour: u32) -> FlatWeatherPayload {
    let current = response.current.clone().unwrap_or_default();
    let rain_probability = response
        .hourly
        .as_ref()
        .map(|h| h.rain_probability_at(hour))
        .unwrap_or(0.0);

    FlatWeatherPayload {
        city: settings.city_name.clone(),
        location: Location {
            lat: settings.city_lat.clone(),
            lon: settings.city_lon.clone(),
        },
        timestamp: current.time,
        temperature: current.temperature_2m,
        humidity: current.relative_humidity_2m,
        wind_speed: current.wind_speed_10m,
        condition_code: current.weather_code,
        is_day: current.is_day,
        rain_probability,
    }
}

/// Fetch and flatten at the current wall-clock local hour. `None` on any failure.
pub async fn fetch(source: &dyn ForecastSource, settings: &Settings) -> Option<FlatWeatherPayload> {
    fetch_at_hour(source, settings, Local::now().hour()).await
}

pub async fn fetch_at_hour(
    source: &dyn ForecastSource,
    settings: &Settings,
    hour: u32,
) -> Option<FlatWeatherPayload> {
    let response = request(source, settings, ForecastRequest::flat(settings)).await?;
    Some(flatten(&response, settings, hour))
}

/// Current-conditions-only fetch for the insight pipeline; the response is returned as decoded.
pub async fn fetch_current(
    source: &dyn ForecastSource,
    settings: &Settings,
) -> Option<ForecastResponse> {
    request(source, settings, ForecastRequest::current_only(settings)).await
}

async fn request(
    source: &dyn ForecastSource,
    settings: &Settings,
    req: ForecastRequest,
) -> Option<ForecastResponse> {
    tracing::info!(
        provider = source.name(),
        lat = %settings.city_lat,
        lon = %settings.city_lon,
        "fetching forecast"
    );
    match source.fetch_forecast(&req).await {
        Ok(response) => Some(response),
        Err(e) => {
            tracing::error!(error = ?e, provider = source.name(), "forecast request failed");
            None
        }
    }
}
