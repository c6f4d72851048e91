//! Weather pipeline for Skycast
//!
//! Resolves city names to coordinates, fetches current conditions, daily
//! forecasts and weather news, derives display icons, and keeps the last
//! snapshot per city in a local JSON file.

pub mod types;
pub mod units;
pub mod icon;
pub mod provider;
pub mod geocode;
pub mod current;
pub mod forecast;
pub mod news;
pub mod store;
pub mod format;
mod error_mapping;

pub use types::*;
pub use current::WeatherClient;
pub use forecast::ForecastClient;
pub use geocode::GeoResolver;
pub use news::NewsClient;
pub use provider::HttpClient;
pub use store::{LocationStore, SavedLocations};
