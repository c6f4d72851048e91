use crate::types::WeatherError as PipelineError;
use skycast_core::{AppError, NetworkError, ReqwestErrorExt, WeatherError};

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Transport(e) => AppError::Network(e.into_network_error()),
            PipelineError::Status { service, status } => {
                AppError::Network(NetworkError::ServerError {
                    status: status.as_u16(),
                    message: format!("{} service", service),
                })
            }
            PipelineError::MalformedResponse(s) => {
                AppError::Network(NetworkError::InvalidResponse(s))
            }
            PipelineError::DataMissing(s) | PipelineError::InsufficientData(s) => {
                AppError::Weather(WeatherError::DataUnavailable(s))
            }
            PipelineError::Persistence(s) => AppError::Weather(WeatherError::StoreError(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_maps_to_server_error() {
        let app_err: AppError = PipelineError::Status {
            service: "geocoding",
            status: reqwest::StatusCode::UNAUTHORIZED,
        }
        .into();
        assert!(matches!(
            app_err,
            AppError::Network(NetworkError::ServerError { status: 401, .. })
        ));
        assert!(app_err.user_message().contains("API key"));
    }

    #[test]
    fn test_sentinel_maps_to_data_unavailable() {
        let app_err = AppError::from(PipelineError::InsufficientData("temperature".into()));
        assert!(matches!(
            app_err,
            AppError::Weather(WeatherError::DataUnavailable(_))
        ));
    }

    #[test]
    fn test_malformed_forecast_maps_to_invalid_response() {
        let app_err = AppError::from(PipelineError::MalformedResponse(
            "daily.precipitation_sum is null at index 3".into(),
        ));
        assert!(matches!(
            app_err,
            AppError::Network(NetworkError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_persistence_maps_to_store_error() {
        let app_err = AppError::from(PipelineError::Persistence("disk full".into()));
        assert_eq!(app_err.user_message(), "Could not save this location.");
    }

    #[tokio::test]
    async fn test_connection_failure_maps_to_network() {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:1/")
            .send()
            .await
            .unwrap_err();

        let app_err = AppError::from(PipelineError::Transport(err));
        assert!(matches!(app_err, AppError::Network(_)));
    }
}
