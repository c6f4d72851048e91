//! Fixed unit conversions used by icon selection and display.

pub mod precipitation {
    const INCHES_PER_MM: f64 = 0.0393701;

    pub fn mm2in(mm: f64) -> f64 {
        mm * INCHES_PER_MM
    }

    #[test]
    fn test_precipitation() {
        assert_eq!(mm2in(0.0), 0.0);
        assert!((mm2in(25.4) - 1.0).abs() < 1e-5);
    }
}

pub mod speed {
    const MPH_PER_KPH: f64 = 0.621371;

    pub fn kph2mph(kph: f64) -> f64 {
        kph * MPH_PER_KPH
    }

    #[test]
    fn test_speed() {
        assert_eq!(kph2mph(0.0), 0.0);
        assert!((kph2mph(100.0) - 62.1371).abs() < 1e-9);
    }
}

pub mod temperature {
    const KELVIN_OFFSET: f64 = 273.15;

    pub fn c2f(temp_c: f64) -> f64 {
        temp_c * 9.0 / 5.0 + 32.0
    }

    pub fn c2k(temp_c: f64) -> f64 {
        temp_c + KELVIN_OFFSET
    }

    #[test]
    fn test_temperature() {
        assert_eq!(c2f(0.0), 32.0);
        assert_eq!(c2f(100.0), 212.0);
        assert_eq!(c2k(0.0), 273.15);
        assert!((c2k(-273.15)).abs() < 1e-9);
    }
}
