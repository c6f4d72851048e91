//! Error conversions the pipeline's own `From` impl does not cover.

use skycast_core::{AppError, ConfigError, WeatherError};
use skycast_weather::WeatherError as PipelineError;

/// News failures all read the same to the user
pub fn from_news(e: PipelineError) -> AppError {
    AppError::Weather(WeatherError::NewsUnavailable(e.to_string()))
}

pub fn location_not_found(city: &str) -> AppError {
    AppError::Weather(WeatherError::LocationNotFound(city.to_string()))
}

/// Keep typed configuration errors, wrap anything else
pub fn from_config(e: anyhow::Error) -> AppError {
    match e.downcast::<ConfigError>() {
        Ok(config_err) => AppError::Config(config_err),
        Err(other) => AppError::Other(other),
    }
}
