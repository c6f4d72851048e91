//! Current conditions from the Open-Meteo forecast endpoint.

use crate::icon;
use crate::provider::HttpClient;
use crate::types::{Coordinate, Reading, WeatherError, WeatherSnapshot};
use serde::Deserialize;
use tracing::instrument;

pub const OPEN_METEO_API_BASE: &str = "https://api.open-meteo.com/v1";

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current_weather: Option<CurrentPayload>,
}

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    temperature: Option<f64>,
    windspeed: Option<f64>,
    humidity: Option<f64>,
    precipitation: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: HttpClient,
    base_url: String,
}

impl WeatherClient {
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

    /// Fetch current conditions at `coord` and derive the icon.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_current(&self, coord: Coordinate) -> Result<WeatherSnapshot, WeatherError> {
        tracing::info!(
            "Fetching weather data for latitude: {}, longitude: {}",
            coord.latitude,
            coord.longitude
        );

        let url = format!("{}/forecast", self.base_url);
        let params = [
            ("latitude", coord.latitude.to_string()),
            ("longitude", coord.longitude.to_string()),
            ("current_weather", "true".to_string()),
            ("timezone", "auto".to_string()),
        ];

        let body: CurrentResponse = match self.http.get_json("weather", &url, &params).await {
            Ok(b) => b,
            Err(e) => {
                tracing::error!("Error fetching weather data: {}", e);
                return Err(e);
            }
        };

        let Some(current) = body.current_weather else {
            tracing::warn!(
                "No current weather data found for {}, {}",
                coord.latitude,
                coord.longitude
            );
            return Err(WeatherError::DataMissing(format!(
                "no current_weather in response for {}, {}",
                coord.latitude, coord.longitude
            )));
        };

        let temperature = Reading::from(current.temperature);
        let windspeed = Reading::from(current.windspeed);
        let precipitation = current.precipitation.unwrap_or(0.0);

        let icon = icon::select_readings(temperature, windspeed, precipitation).inspect_err(|e| {
            tracing::warn!("Cannot pick a weather icon: {}", e);
        })?;

        Ok(WeatherSnapshot {
            temperature,
            windspeed,
            humidity: Reading::from(current.humidity),
            precipitation,
            icon,
        })
    }
}
