//! Matching forecast entries to the moment a route sample will be reached.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use serde::Deserialize;
use strum_macros::{Display, EnumString};

use crate::error::{Result, RouteError};

const MM_PER_INCH: f64 = 25.4;

/// Anything the matcher can key on a start time.
pub trait ForecastEntry {
    fn start_time(&self) -> Option<&str>;
}

impl ForecastEntry for serde_json::Value {
    fn start_time(&self) -> Option<&str> {
        self.pointer("/interval/startTime")
            .and_then(serde_json::Value::as_str)
    }
}

impl ForecastEntry for HourlyForecast {
    fn start_time(&self) -> Option<&str> {
        self.interval.start_time.as_deref()
    }
}

impl ForecastEntry for DailyForecast {
    fn start_time(&self) -> Option<&str> {
        self.interval.start_time.as_deref()
    }
}

/// Parses an ISO-8601 timestamp. A `Z` suffix means UTC, and a timestamp
/// without any offset is also read as UTC.
pub fn parse_start_time(text: &str) -> Result<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Ok(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|t| t.and_utc())
        .map_err(|_| RouteError::InvalidTimestamp(text.to_string()))
}

/// Returns the entry whose start time is nearest `target`. Entries without a
/// usable timestamp are skipped; on equal distance the earlier entry wins.
pub fn closest<E: ForecastEntry>(entries: &[E], target: DateTime<Utc>) -> Option<&E> {
    let mut best: Option<(&E, TimeDelta)> = None;
    for entry in entries {
        let time = match entry.start_time().map(parse_start_time) {
            Some(Ok(time)) => time,
            Some(Err(err)) => {
                debug!("skipping forecast entry: {err}");
                continue;
            }
            None => continue,
        };
        let diff = (time - target).abs();
        let is_better = match &best {
            Some((_, min_diff)) => diff < *min_diff,
            None => true,
        };
        if is_better {
            best = Some((entry, diff));
        }
    }
    best.map(|(entry, _)| entry)
}

/// Which forecast product covers a target time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ForecastHorizon {
    Hourly,
    Daily,
}

impl ForecastHorizon {
    /// Hourly forecasts only reach so far ahead, past `hourly_window` fall
    /// back to daily ones.
    pub fn for_target(
        now: DateTime<Utc>,
        target: DateTime<Utc>,
        hourly_window: TimeDelta,
    ) -> ForecastHorizon {
        if target - now > hourly_window {
            ForecastHorizon::Daily
        } else {
            ForecastHorizon::Hourly
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    #[serde(default)]
    pub start_time: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Temperature {
    #[serde(default)]
    pub degrees: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Text {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WeatherCondition {
    #[serde(default)]
    pub description: Option<Text>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Probability {
    #[serde(default)]
    pub percent: Option<u32>,
}

/// Quantitative precipitation forecast, millimeters.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Qpf {
    #[serde(default)]
    pub quantity: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Precipitation {
    #[serde(default)]
    pub probability: Option<Probability>,
    #[serde(default)]
    pub qpf: Option<Qpf>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyForecast {
    #[serde(default)]
    pub interval: Interval,
    #[serde(default)]
    pub temperature: Option<Temperature>,
    #[serde(default)]
    pub weather_condition: Option<WeatherCondition>,
    #[serde(default)]
    pub precipitation: Option<Precipitation>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPartForecast {
    #[serde(default)]
    pub weather_condition: Option<WeatherCondition>,
    #[serde(default)]
    pub precipitation: Option<Precipitation>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    #[serde(default)]
    pub interval: Interval,
    #[serde(default)]
    pub max_temperature: Option<Temperature>,
    #[serde(default)]
    pub daytime_forecast: Option<DayPartForecast>,
    #[serde(default)]
    pub weather_condition: Option<WeatherCondition>,
    #[serde(default)]
    pub precipitation: Option<Precipitation>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyForecastResponse {
    #[serde(default)]
    pub forecast_hours: Vec<HourlyForecast>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecastResponse {
    #[serde(default)]
    pub forecast_days: Vec<DailyForecast>,
}

/// The fields a caller shows for a matched forecast.
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastSummary {
    pub temperature_f: Option<f64>,
    pub condition: String,
    pub precipitation_percent: u32,
    pub precipitation_inches: Option<f64>,
}

fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

fn summarize(
    temperature: Option<&Temperature>,
    condition: Option<&WeatherCondition>,
    precipitation: Option<&Precipitation>,
) -> ForecastSummary {
    let probability = precipitation.and_then(|p| p.probability.as_ref());
    let qpf = precipitation.and_then(|p| p.qpf.as_ref());
    ForecastSummary {
        temperature_f: temperature
            .and_then(|t| t.degrees)
            .map(celsius_to_fahrenheit),
        condition: condition
            .and_then(|c| c.description.as_ref())
            .and_then(|d| d.text.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
        precipitation_percent: probability.and_then(|p| p.percent).unwrap_or(0),
        precipitation_inches: qpf.and_then(|q| q.quantity).map(|mm| mm / MM_PER_INCH),
    }
}

impl HourlyForecast {
    pub fn summary(&self) -> ForecastSummary {
        summarize(
            self.temperature.as_ref(),
            self.weather_condition.as_ref(),
            self.precipitation.as_ref(),
        )
    }
}

impl DailyForecast {
    /// Prefers the daytime part of the day for condition and precipitation.
    pub fn summary(&self) -> ForecastSummary {
        let daytime = self.daytime_forecast.as_ref();
        summarize(
            self.max_temperature.as_ref(),
            daytime
                .and_then(|d| d.weather_condition.as_ref())
                .or(self.weather_condition.as_ref()),
            daytime
                .and_then(|d| d.precipitation.as_ref())
                .or(self.precipitation.as_ref()),
        )
    }
}
