//! Plain-text renderings shown by the desktop shell and the CLI.

use crate::types::{ForecastDay, NewsArticle, Reading, WeatherSnapshot};
use crate::units::{
    precipitation::mm2in,
    speed::kph2mph,
    temperature::{c2f, c2k},
};
use std::fmt::Write;

pub const NO_FORECAST: &str = "No forecast data available.";

/// Multi-line forecast report, one block per day, in the given order.
pub fn forecast_report(days: &[ForecastDay]) -> String {
    if days.is_empty() {
        return NO_FORECAST.to_string();
    }

    let mut out = String::new();
    for day in days {
        // Writing to a String cannot fail
        let _ = write!(
            out,
            "Date: {}\n\
             Conditions: {} ({})\n\
             Max Temperature: {}°C / {:.1}°F\n\
             Min Temperature: {}°C / {:.1}°F\n\
             Max Windspeed: {} km/h / {:.1} mph\n\
             Precipitation: {} mm\n\n",
            day.date.format("%A, %Y-%m-%d"),
            day.icon.description(),
            day.icon.asset_name(),
            day.max_temp,
            c2f(day.max_temp),
            day.min_temp,
            c2f(day.min_temp),
            day.windspeed_max,
            kph2mph(day.windspeed_max),
            day.precipitation_sum,
        );
    }
    out
}

/// Short description of current conditions for `city`.
///
/// The humidity line is left out when the service did not report it.
pub fn snapshot_summary(city: &str, snapshot: &WeatherSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}: {}", city, snapshot.icon.description());
    let _ = writeln!(out, "Icon: {}", snapshot.icon.asset_name());
    let _ = writeln!(out, "Temperature: {}", temperature_text(snapshot.temperature));
    let _ = writeln!(out, "Windspeed: {}", windspeed_text(snapshot.windspeed));
    if snapshot.humidity.is_available() {
        let _ = writeln!(out, "Humidity: {}%", snapshot.humidity);
    }
    let _ = write!(
        out,
        "Precipitation: {} mm ({:.2} in)",
        snapshot.precipitation,
        mm2in(snapshot.precipitation)
    );
    out
}

/// Numbered headline list of the first `limit` articles.
pub fn headlines(articles: &[NewsArticle], limit: usize) -> String {
    let mut out = String::new();
    for (i, article) in articles.iter().take(limit).enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, article.title);
        if !article.description.is_empty() {
            let _ = writeln!(out, "   {}", article.description);
        }
        let _ = writeln!(out, "   {}", article.url);
    }
    out
}

fn temperature_text(reading: Reading) -> String {
    match reading {
        Reading::Value(c) => format!("{}°C / {:.1}°F / {:.1}K", c, c2f(c), c2k(c)),
        Reading::NotAvailable => reading.to_string(),
    }
}

fn windspeed_text(reading: Reading) -> String {
    match reading {
        Reading::Value(kmh) => format!("{} km/h / {:.1} mph", kmh, kph2mph(kmh)),
        Reading::NotAvailable => reading.to_string(),
    }
}
