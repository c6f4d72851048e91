//! Flat JSON file of the last snapshot fetched for each city.
//!
//! Every save reads the whole file, replaces one entry and rewrites the whole
//! file. There is no locking and no atomic rename: callers must not save from
//! more than one thread at a time.

use crate::types::{WeatherError, WeatherSnapshot};
use serde::Serialize;
use skycast_core::config::DATA_FILE;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// City name, verbatim as typed, to its latest snapshot
pub type SavedLocations = BTreeMap<String, WeatherSnapshot>;

#[derive(Debug, Clone)]
pub struct LocationStore {
    path: PathBuf,
}

impl LocationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default data file name inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DATA_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every saved snapshot.
    ///
    /// Never fails: a missing or unreadable file yields an empty map.
    pub fn load(&self) -> SavedLocations {
        match self.read_all() {
            Ok(saved) => {
                tracing::info!("Weather data loaded successfully ({} cities)", saved.len());
                saved
            }
            Err(ReadError::Missing) => {
                tracing::warn!(
                    "Weather data file {} not found. Returning empty data.",
                    self.path.display()
                );
                SavedLocations::new()
            }
            Err(ReadError::Other(e)) => {
                tracing::error!("Error loading weather data: {}", e);
                SavedLocations::new()
            }
        }
    }

    /// Saved city names in key order
    pub fn cities(&self) -> Vec<String> {
        self.load().into_keys().collect()
    }

    /// Insert or overwrite the snapshot for `city` and rewrite the file.
    ///
    /// The file (and its directory) is created holding an empty map if it
    /// does not exist yet. A file that exists but does not parse is left
    /// untouched and reported as an error.
    pub fn save(&self, city: &str, snapshot: &WeatherSnapshot) -> Result<(), WeatherError> {
        tracing::info!("Saving weather data for {}...", city);

        let result = self.ensure_exists().and_then(|()| {
            let mut saved = self.read_all().map_err(ReadError::into_persistence)?;
            saved.insert(city.to_string(), snapshot.clone());
            self.write_all(&saved)
        });

        match &result {
            Ok(()) => tracing::info!("Weather data for {} saved successfully.", city),
            Err(e) => tracing::error!("Error saving weather data for {}: {}", city, e),
        }
        result
    }

    fn ensure_exists(&self) -> Result<(), WeatherError> {
        if self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    WeatherError::Persistence(format!(
                        "failed to create {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        tracing::debug!("Creating empty weather data file at {}", self.path.display());
        self.write_all(&SavedLocations::new())
    }

    fn read_all(&self) -> Result<SavedLocations, ReadError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ReadError::Missing,
            _ => ReadError::Other(format!("failed to read {}: {}", self.path.display(), e)),
        })?;

        if contents.trim().is_empty() {
            return Ok(SavedLocations::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            ReadError::Other(format!("failed to parse {}: {}", self.path.display(), e))
        })
    }

    fn write_all(&self, saved: &SavedLocations) -> Result<(), WeatherError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        saved
            .serialize(&mut ser)
            .map_err(|e| WeatherError::Persistence(format!("failed to serialize: {}", e)))?;

        fs::write(&self.path, buf).map_err(|e| {
            WeatherError::Persistence(format!("failed to write {}: {}", self.path.display(), e))
        })
    }
}

#[derive(Debug)]
enum ReadError {
    Missing,
    Other(String),
}

impl ReadError {
    fn into_persistence(self) -> WeatherError {
        match self {
            Self::Missing => WeatherError::Persistence("weather data file disappeared".to_string()),
            Self::Other(msg) => WeatherError::Persistence(msg),
        }
    }
}
