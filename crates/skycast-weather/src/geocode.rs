//! Forward geocoding: convert a city name or postal code to coordinates.
//! Uses the OpenCage geocoding API; requires an API key.

use crate::provider::HttpClient;
use crate::types::{Coordinate, WeatherError};
use serde::Deserialize;
use tracing::instrument;

pub const OPENCAGE_API_BASE: &str = "https://api.opencagedata.com/geocode/v1";

#[derive(Debug, Deserialize)]
struct OpenCageResponse {
    #[serde(default)]
    results: Vec<OpenCageResult>,
}

#[derive(Debug, Deserialize)]
struct OpenCageResult {
    geometry: OpenCageGeometry,
}

#[derive(Debug, Deserialize)]
struct OpenCageGeometry {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Clone)]
pub struct GeoResolver {
    http: HttpClient,
    api_key: String,
    base_url: String,
}

impl GeoResolver {
    pub fn new(http: HttpClient, api_key: &str) -> Self {
        Self {
            http,
            api_key: api_key.to_string(),
            base_url: OPENCAGE_API_BASE.to_string(),
        }
    }

    /// Point the resolver at another OpenCage-compatible endpoint.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Resolve `query` to the service's top-ranked match.
    ///
    /// Returns `Ok(None)` when the service knows no place by that name.
    #[instrument(skip(self), level = "info")]
    pub async fn resolve(&self, query: &str) -> Result<Option<Coordinate>, WeatherError> {
        tracing::info!("Fetching location data for: {}", query);

        let url = format!("{}/json", self.base_url);
        let params = [("q", query.to_string()), ("key", self.api_key.clone())];

        let body: OpenCageResponse = match self.http.get_json("geocoding", &url, &params).await {
            Ok(b) => b,
            Err(e) => {
                tracing::error!("Error fetching location data for {}: {}", query, e);
                return Err(e);
            }
        };

        // The service ranks candidates; only the first one is used
        match body.results.into_iter().next() {
            Some(first) => {
                let coord = Coordinate::new(first.geometry.lat, first.geometry.lng);
                tracing::info!(
                    "Location found: latitude {}, longitude {}",
                    coord.latitude,
                    coord.longitude
                );
                Ok(Some(coord))
            }
            None => {
                tracing::warn!("City not found: {}", query);
                Ok(None)
            }
        }
    }
}
