//! Daily forecast from the Open-Meteo forecast endpoint.

use crate::current::OPEN_METEO_API_BASE;
use crate::icon;
use crate::provider::HttpClient;
use crate::types::{Coordinate, ForecastDay, WeatherError};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::instrument;

const DAILY_VARIABLES: &str =
    "temperature_2m_max,temperature_2m_min,windspeed_10m_max,precipitation_sum";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyPayload>,
}

#[derive(Debug, Deserialize)]
struct DailyPayload {
    time: Vec<String>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    windspeed_10m_max: Vec<Option<f64>>,
    precipitation_sum: Vec<Option<f64>>,
}

/// Entry `i` of a daily array; the service sends `null` for days it has no value for.
fn entry(name: &str, values: &[Option<f64>], i: usize) -> Result<f64, WeatherError> {
    values[i].ok_or_else(|| {
        WeatherError::MalformedResponse(format!("daily.{} is null at index {}", name, i))
    })
}

impl DailyPayload {
    /// Zip the parallel arrays into days, keeping the order of `time`.
    fn into_days(self) -> Result<Vec<ForecastDay>, WeatherError> {
        let len = self.time.len();
        let lengths = [
            ("temperature_2m_max", self.temperature_2m_max.len()),
            ("temperature_2m_min", self.temperature_2m_min.len()),
            ("windspeed_10m_max", self.windspeed_10m_max.len()),
            ("precipitation_sum", self.precipitation_sum.len()),
        ];
        if let Some((name, n)) = lengths.iter().find(|(_, n)| *n != len) {
            return Err(WeatherError::MalformedResponse(format!(
                "daily.{} has {} entries but daily.time has {}",
                name, n, len
            )));
        }

        self.time
            .iter()
            .enumerate()
            .map(|(i, date)| {
                let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
                    WeatherError::MalformedResponse(format!("bad forecast date {:?}: {}", date, e))
                })?;
                let max_temp = entry("temperature_2m_max", &self.temperature_2m_max, i)?;
                let min_temp = entry("temperature_2m_min", &self.temperature_2m_min, i)?;
                let windspeed_max = entry("windspeed_10m_max", &self.windspeed_10m_max, i)?;
                let precipitation_sum = entry("precipitation_sum", &self.precipitation_sum, i)?;

                Ok(ForecastDay {
                    date,
                    max_temp,
                    min_temp,
                    windspeed_max,
                    precipitation_sum,
                    icon: icon::select(max_temp, windspeed_max, precipitation_sum),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: HttpClient,
    base_url: String,
}

impl ForecastClient {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            base_url: OPEN_METEO_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Fetch the daily forecast for the service's default horizon.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_daily(&self, coord: Coordinate) -> Result<Vec<ForecastDay>, WeatherError> {
        let url = format!("{}/forecast", self.base_url);
        let params = [
            ("latitude", coord.latitude.to_string()),
            ("longitude", coord.longitude.to_string()),
            ("daily", DAILY_VARIABLES.to_string()),
            ("timezone", "auto".to_string()),
        ];

        let body: ForecastResponse = match self.http.get_json("forecast", &url, &params).await {
            Ok(b) => b,
            Err(e) => {
                tracing::error!("Error fetching forecast data: {}", e);
                return Err(e);
            }
        };
        tracing::debug!("Forecast data: {:?}", body);

        let daily = body.daily.ok_or_else(|| {
            tracing::warn!("No forecast data available.");
            WeatherError::MalformedResponse("no daily section in forecast response".to_string())
        })?;

        daily.into_days()
    }
}
