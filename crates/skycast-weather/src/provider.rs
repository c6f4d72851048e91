//! Shared HTTP plumbing for the geocoding, weather and news clients.

use crate::types::WeatherError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));

/// A reqwest client shared by every service client.
///
/// Cloning is cheap; all clones reuse one connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Build the shared client. `None` keeps the transport's default timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self, WeatherError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// GET `url` with `query` and decode the JSON body.
    ///
    /// Network failures and non-2xx statuses are transport errors; a 2xx body
    /// that does not decode into `T` is a malformed response.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        service: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status { service, status });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            WeatherError::MalformedResponse(format!("{} JSON parse error: {}", service, e))
        })
    }
}
