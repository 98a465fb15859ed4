/// Utility functions
use chrono::{Local, NaiveDate, NaiveTime};

/// Current calendar date on the operator's local clock
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// `"YYYY-MM-DD HH:MM"` from a date and a raw time-of-day string.
/// The time is passed through untouched.
pub fn local_timestamp(date: NaiveDate, time_of_day: &str) -> String {
    format!("{} {}", date.format("%Y-%m-%d"), time_of_day)
}

/// Parse an `HH:MM` time-of-day
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    if s.len() != 5 {
        return None;
    }
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

/// Calculate distance between two coordinates using Haversine formula
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let rlat1 = lat1.to_radians();
    let rlat2 = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2) + rlat1.cos() * rlat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    6371.0 * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_km_zero_distance() {
        let distance = haversine_km(0.0, 0.0, 0.0, 0.0);
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn test_haversine_km_known_distance() {
        // Colombo Fort to Katunayake airport, roughly 30 km
        let distance = haversine_km(6.9271, 79.8612, 7.1808, 79.8841);
        assert!((distance - 28.3).abs() < 2.0);
    }

    #[test]
    fn test_local_timestamp_pads_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(local_timestamp(date, "09:00"), "2026-03-07 09:00");
    }

    #[test]
    fn test_parse_time_of_day() {
        assert!(parse_time_of_day("09:00").is_some());
        assert!(parse_time_of_day("23:59").is_some());
        assert!(parse_time_of_day("24:00").is_none());
        assert!(parse_time_of_day("9:00").is_none());
        assert!(parse_time_of_day("09:00:00").is_none());
        assert!(parse_time_of_day("").is_none());
    }
}
