use clap::Parser;
use std::process::ExitCode;

use skycast_core::{AppError, Config, ConfigError};
use skycast_weather::{
    format, Coordinate, ForecastClient, GeoResolver, HttpClient, LocationStore, NewsClient,
    WeatherClient,
};

mod cli;
mod error_mapping;

use cli::{Args, Command};
use error_mapping::{from_config, from_news, location_not_found};

/// Headlines shown by `skycast news`
const NEWS_DISPLAY_LIMIT: usize = 5;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = skycast_core::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let config_path = args.config.unwrap_or_else(Config::default_path);
    let (config, _) = Config::load_validated(&config_path).map_err(from_config)?;

    let data_file = args
        .data_file
        .unwrap_or_else(|| config.store.data_file.clone());
    let store = LocationStore::new(data_file);

    match args.command {
        Command::Weather { city } => show_weather(&config, &store, &city).await,
        Command::Forecast { city } => show_forecast(&config, &city).await,
        Command::Saved { refresh: false } => {
            list_saved(&store);
            Ok(())
        }
        Command::Saved { refresh: true } => {
            refresh_saved(&config, &store).await;
            Ok(())
        }
        Command::News => show_news(&config).await,
    }
}

fn http_client(config: &Config) -> Result<HttpClient, AppError> {
    Ok(HttpClient::new(config.api.request_timeout())?)
}

/// Resolve `city`, reporting lookup failures the same way as unknown cities.
async fn resolve(config: &Config, http: &HttpClient, city: &str) -> Result<Coordinate, AppError> {
    if !config.api.has_geocode_key() {
        return Err(ConfigError::MissingSetting("api.geocode_api_key".to_string()).into());
    }

    let geo = GeoResolver::new(http.clone(), &config.api.geocode_api_key)
        .with_base_url(&config.api.geocode_url);

    match geo.resolve(city).await {
        Ok(Some(coord)) => Ok(coord),
        Ok(None) => Err(location_not_found(city)),
        Err(e) => {
            tracing::debug!("Treating geocoding failure for {} as not found: {}", city, e);
            Err(location_not_found(city))
        }
    }
}

async fn show_weather(config: &Config, store: &LocationStore, city: &str) -> Result<(), AppError> {
    let http = http_client(config)?;
    let coord = resolve(config, &http, city).await?;

    let snapshot = WeatherClient::new(http)
        .with_base_url(&config.api.weather_url)
        .fetch_current(coord)
        .await?;

    println!("{}", format::snapshot_summary(city, &snapshot));

    // The lookup itself succeeded; a failed save is reported but not fatal
    if let Err(e) = store.save(city, &snapshot) {
        eprintln!("Warning: {}", AppError::from(e).user_message());
    }
    Ok(())
}

async fn show_forecast(config: &Config, city: &str) -> Result<(), AppError> {
    let http = http_client(config)?;
    let coord = resolve(config, &http, city).await?;

    let days = ForecastClient::new(http)
        .with_base_url(&config.api.weather_url)
        .fetch_daily(coord)
        .await?;

    println!("Forecast for {}\n", city);
    print!("{}", format::forecast_report(&days));
    Ok(())
}

fn list_saved(store: &LocationStore) {
    let saved = store.load();
    if saved.is_empty() {
        println!("No saved locations yet.");
        return;
    }

    for (city, snapshot) in &saved {
        println!("{}\n", format::snapshot_summary(city, snapshot));
    }
}

/// Look up every saved city again, saving the fresh snapshots.
async fn refresh_saved(config: &Config, store: &LocationStore) {
    let cities = store.cities();
    if cities.is_empty() {
        println!("No saved locations yet.");
        return;
    }

    for city in cities {
        if let Err(e) = show_weather(config, store, &city).await {
            tracing::warn!("Refreshing {} failed: {}", city, e);
            eprintln!("{}: {}", city, e.user_message());
        }
        println!();
    }
}

async fn show_news(config: &Config) -> Result<(), AppError> {
    if !config.api.has_news_key() {
        return Err(ConfigError::MissingSetting("api.news_api_key".to_string()).into());
    }

    let articles = NewsClient::new(http_client(config)?, &config.api.news_api_key)
        .with_base_url(&config.api.news_url)
        .fetch_weather_news()
        .await
        .map_err(from_news)?;

    if articles.is_empty() {
        println!("No weather news found.");
    } else {
        print!("{}", format::headlines(&articles, NEWS_DISPLAY_LIMIT));
    }
    Ok(())
}
