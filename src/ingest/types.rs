// src/ingest/types.rs
use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::Settings;

pub const FORECAST_TIMEZONE: &str = "America/Sao_Paulo";

const FLAT_CURRENT_FIELDS: &[&str] = &[
    "temperature_2m",
    "relative_humidity_2m",
    "wind_speed_10m",
    "weather_code",
    "is_day",
];
const INSIGHT_CURRENT_FIELDS: &[&str] = &[
    "temperature_2m",
    "relative_humidity_2m",
    "wind_speed_10m",
    "weather_code",
];
const FLAT_HOURLY_FIELDS: &[&str] = &["precipitation_probability"];

/// Decoded forecast body. Both blocks are optional so a partial response still decodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub current: Option<CurrentConditions>,
    #[serde(default)]
    pub hourly: Option<HourlyForecast>,
}

/// `current` block; any key may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub temperature_2m: Option<f64>,
    #[serde(default)]
    pub relative_humidity_2m: Option<f64>,
    #[serde(default)]
    pub wind_speed_10m: Option<f64>,
    #[serde(default, deserialize_with = "integral")]
    pub weather_code: Option<i64>,
    #[serde(default, deserialize_with = "integral")]
    pub is_day: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    /// One slot per local hour; Open-Meteo emits `null` for unknown hours.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub precipitation_probability: Vec<Option<f64>>,
}

impl HourlyForecast {
    /// Probability for `hour`, or `0` when the slot is missing or null.
    pub fn rain_probability_at(&self, hour: u32) -> f64 {
        self.precipitation_probability
            .get(hour as usize)
            .copied()
            .flatten()
            .unwrap_or(0.0)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// Integer field that may arrive as `3` or `3.0`. Fractional or out-of-range values read as `None`.
fn integral<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let Some(raw) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if !raw.is_finite() || raw.fract() != 0.0 || raw.abs() > i64::MAX as f64 {
        return Ok(None);
    }
    Ok(T::try_from(raw as i64).ok())
}

/// Query sent to the forecast endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub latitude: String,
    pub longitude: String,
    pub current: &'static [&'static str],
    pub hourly: &'static [&'static str],
    pub forecast_days: Option<u8>,
    pub timezone: &'static str,
}

impl ForecastRequest {
    /// Current conditions plus today's hourly rain probability.
    pub fn flat(settings: &Settings) -> Self {
        Self {
            latitude: settings.city_lat.clone(),
            longitude: settings.city_lon.clone(),
            current: FLAT_CURRENT_FIELDS,
            hourly: FLAT_HOURLY_FIELDS,
            forecast_days: Some(1),
            timezone: FORECAST_TIMEZONE,
        }
    }

    /// Current conditions only, for the insight pipeline.
    pub fn current_only(settings: &Settings) -> Self {
        Self {
            latitude: settings.city_lat.clone(),
            longitude: settings.city_lon.clone(),
            current: INSIGHT_CURRENT_FIELDS,
            hourly: &[],
            forecast_days: None,
            timezone: FORECAST_TIMEZONE,
        }
    }

    /// Query-string pairs in the order the API documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("latitude", self.latitude.clone()),
            ("longitude", self.longitude.clone()),
            ("current", self.current.join(",")),
        ];
        if !self.hourly.is_empty() {
            out.push(("hourly", self.hourly.join(",")));
        }
        if let Some(days) = self.forecast_days {
            out.push(("forecast_days", days.to_string()));
        }
        out.push(("timezone", self.timezone.to_string()));
        out
    }
}

#[async_trait::async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch_forecast(&self, request: &ForecastRequest) -> Result<ForecastResponse>;
    fn name(&self) -> &'static str;
}
