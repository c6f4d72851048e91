use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Placeholder written in place of a field the weather service left out
pub const NOT_AVAILABLE: &str = "N/A";

/// Icon categories derived from current or forecast conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconCategory {
    #[serde(alias = "rain_icon.png")]
    Rain,
    #[serde(alias = "wind_icon.png")]
    Wind,
    #[serde(alias = "cloudy_icon.png")]
    Cloudy,
    #[serde(alias = "sun_icon.png")]
    Sun,
}

impl IconCategory {
    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Rain => "Rain",
            Self::Wind => "Windy",
            Self::Cloudy => "Cloudy",
            Self::Sun => "Sunny",
        }
    }

    /// Image asset the desktop shell loads for this category
    pub fn asset_name(&self) -> &'static str {
        match self {
            Self::Rain => "rain_icon.png",
            Self::Wind => "wind_icon.png",
            Self::Cloudy => "cloudy_icon.png",
            Self::Sun => "sun_icon.png",
        }
    }
}

/// A measured value, or the "N/A" sentinel when the service omitted it.
///
/// The sentinel is never treated as zero. It serializes as the string `"N/A"`
/// so store files stay readable by older versions of the app.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Reading {
    Value(f64),
    #[default]
    NotAvailable,
}

impl Reading {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::NotAvailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl From<Option<f64>> for Reading {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::NotAvailable, Self::Value)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{}", v),
            Self::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => serializer.serialize_f64(*v),
            Self::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for Reading {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
            Null(()),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(v) => Ok(Self::Value(v)),
            Raw::Text(s) if s == NOT_AVAILABLE => Ok(Self::NotAvailable),
            Raw::Text(s) => Err(serde::de::Error::custom(format!(
                "expected a number or \"{}\", got \"{}\"",
                NOT_AVAILABLE, s
            ))),
            Raw::Null(()) => Ok(Self::NotAvailable),
        }
    }
}

/// Geographic coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Current weather conditions, as persisted per city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Degrees Celsius
    pub temperature: Reading,
    /// km/h
    pub windspeed: Reading,
    #[serde(default)]
    pub humidity: Reading,
    /// Millimetres
    #[serde(default)]
    pub precipitation: f64,
    pub icon: IconCategory,
}

/// Daily forecast entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub max_temp: f64,
    pub min_temp: f64,
    pub windspeed_max: f64,
    pub precipitation_sum: f64,
    pub icon: IconCategory,
}

/// Weather news article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
    pub url: String,
}

/// Weather pipeline errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{service} returned HTTP {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Data missing: {0}")]
    DataMissing(String),
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl WeatherError {
    /// True for network failures and non-success HTTP statuses
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }
}
