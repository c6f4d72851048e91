//! Icon selection from temperature, wind and precipitation.
//!
//! Rules are checked in priority order and the first match wins:
//! rain above 0.2 in, wind above 15 mph, cloudy below 17 °C, otherwise sun.

use crate::types::{IconCategory, Reading, WeatherError};
use crate::units::{precipitation::mm2in, speed::kph2mph};

const RAIN_THRESHOLD_IN: f64 = 0.2;
const WIND_THRESHOLD_MPH: f64 = 15.0;
const CLOUDY_BELOW_C: f64 = 17.0;

/// Pick the icon for metric inputs (°C, km/h, mm).
pub fn select(temp_c: f64, wind_kmh: f64, precip_mm: f64) -> IconCategory {
    classify(temp_c, kph2mph(wind_kmh), mm2in(precip_mm))
}

/// Like [`select`], but refuses to guess when temperature or wind is "N/A".
pub fn select_readings(
    temperature: Reading,
    windspeed: Reading,
    precip_mm: f64,
) -> Result<IconCategory, WeatherError> {
    match (temperature.value(), windspeed.value()) {
        (Some(t), Some(w)) => Ok(select(t, w, precip_mm)),
        _ => Err(WeatherError::InsufficientData(format!(
            "icon needs temperature and windspeed, got temperature={} windspeed={}",
            temperature, windspeed
        ))),
    }
}

fn classify(temp_c: f64, wind_mph: f64, precip_in: f64) -> IconCategory {
    if precip_in > RAIN_THRESHOLD_IN {
        IconCategory::Rain
    } else if wind_mph > WIND_THRESHOLD_MPH {
        IconCategory::Wind
    } else if temp_c < CLOUDY_BELOW_C {
        IconCategory::Cloudy
    } else {
        IconCategory::Sun
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rain_boundary_is_strict() {
        assert_ne!(classify(20.0, 0.0, 0.2), IconCategory::Rain);
        assert_eq!(classify(20.0, 0.0, 0.2000001), IconCategory::Rain);
    }

    #[test]
    fn test_wind_boundary_is_strict() {
        assert_ne!(classify(20.0, 15.0, 0.0), IconCategory::Wind);
        assert_eq!(classify(20.0, 15.0001, 0.0), IconCategory::Wind);
    }

    #[test]
    fn test_cloudy_boundary() {
        assert_eq!(classify(17.0, 0.0, 0.0), IconCategory::Sun);
        assert_eq!(classify(16.999, 0.0, 0.0), IconCategory::Cloudy);
    }

    #[test]
    fn test_light_rain_mild_wind_warm_is_sun() {
        // 5 mm ~ 0.197 in, 10 km/h ~ 6.2 mph
        assert_eq!(select(20.0, 10.0, 5.0), IconCategory::Sun);
    }

    #[test]
    fn test_heavy_rain_wins_over_everything() {
        assert_eq!(select(30.0, 100.0, 10.0), IconCategory::Rain);
        assert_eq!(select(-5.0, 0.0, 10.0), IconCategory::Rain);
    }

    #[test]
    fn test_wind_wins_over_temperature() {
        // 30 km/h ~ 18.6 mph
        assert_eq!(select(5.0, 30.0, 0.0), IconCategory::Wind);
    }

    #[test]
    fn test_select_is_deterministic() {
        let first = select(12.3, 4.5, 1.2);
        for _ in 0..10 {
            assert_eq!(select(12.3, 4.5, 1.2), first);
        }
        assert_eq!(first, IconCategory::Cloudy);
    }

    #[test]
    fn test_select_readings_rejects_sentinel() {
        let result = select_readings(Reading::NotAvailable, Reading::Value(5.0), 0.0);
        assert!(matches!(result, Err(WeatherError::InsufficientData(_))));

        let result = select_readings(Reading::Value(20.0), Reading::NotAvailable, 0.0);
        assert!(matches!(result, Err(WeatherError::InsufficientData(_))));
    }

    #[test]
    fn test_select_readings_with_numbers() {
        let icon = select_readings(Reading::Value(20.0), Reading::Value(5.0), 0.0).unwrap();
        assert_eq!(icon, IconCategory::Sun);
    }
}
