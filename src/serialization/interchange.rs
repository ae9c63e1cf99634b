/// Flat JSON interchange document consumed by the web layer
///
/// Keys are the snapshot's field names (`DID`, `number_of_CRC_errors_detected`
/// and the `*_units` keys included). Unset fields are written as their
/// sentinel values. On the way back in, unknown keys are ignored and missing
/// keys stay unset.
use log::warn;

use crate::error::InterchangeError;
use crate::models::WeatherSnapshot;

const EXCERPT_LIMIT: usize = 200;

/// Pretty-printed interchange document for `snapshot`.
pub fn to_json(snapshot: &WeatherSnapshot) -> Result<String, InterchangeError> {
    serde_json::to_string_pretty(snapshot).map_err(InterchangeError::Encode)
}

/// Parse an interchange document. A malformed document yields no snapshot,
/// only the diagnostic.
pub fn from_json(document: &str) -> Result<WeatherSnapshot, InterchangeError> {
    serde_json::from_str(document).map_err(|e| {
        let error = InterchangeError::Malformed {
            reason: e.to_string(),
            line: e.line(),
            column: e.column(),
            excerpt: excerpt(document),
        };
        warn!("Bad interchange document: {}", error);
        error
    })
}

fn excerpt(document: &str) -> String {
    match document.char_indices().nth(EXCERPT_LIMIT) {
        Some((end, _)) => format!("{}...", &document[..end]),
        None => document.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BarTrend, BatteryStatus, StormDate};
    use serde_json::Value;
    use time::macros::datetime;

    #[test]
    fn fresh_snapshot_serializes_sentinels() {
        let document = to_json(&WeatherSnapshot::new()).unwrap();
        let value: Value = serde_json::from_str(&document).unwrap();

        assert_eq!(value["barometer"], Value::from(f64::MAX));
        assert_eq!(value["inside_humidity"], Value::from(i32::MAX));
        assert_eq!(value["bar_trend"], "N/A");
        assert_eq!(value["time"], "N/A");
        assert_eq!(value["DID"], "N/A");
        assert_eq!(value["number_of_CRC_errors_detected"], Value::from(i32::MAX));
        assert_eq!(value["temperature_units"], "&#x00B0;F");
    }

    #[test]
    fn round_trips_set_fields() {
        let mut snapshot = WeatherSnapshot::new();
        snapshot.station.system_name = Some("Backyard".to_string());
        snapshot.stamp(datetime!(2023-06-01 19:30:12 UTC));
        snapshot.current.barometer = Some(29.921);
        snapshot.current.bar_trend = Some(BarTrend::FallingSlowly);
        snapshot.current.dew_point = Some(-4);
        snapshot.current.start_date_of_current_storm = Some(StormDate {
            year: 2127,
            month: 15,
            day: 31,
        });
        snapshot.accumulators.transmitter_battery_status = Some(BatteryStatus::Ok);
        snapshot.extremes.time_of_hi_speed = Some(datetime!(2023-06-01 16:42 UTC));
        snapshot.derived.heat_index_derived = Some(105.92202060000027);
        snapshot.forecast.period_1_short_forecast = Some("Sunny".to_string());

        let parsed = from_json(&to_json(&snapshot).unwrap()).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn fractional_instants_round_trip() {
        let mut snapshot = WeatherSnapshot::new();
        snapshot.station.time = Some(datetime!(2023-06-01 19:30:12.5 UTC));
        snapshot.extremes.time_of_day_low_bar = Some(datetime!(2023-06-01 09:05:00.25 UTC));

        let document = to_json(&snapshot).unwrap();
        let value: Value = serde_json::from_str(&document).unwrap();
        assert_eq!(value["time"], "2023-06-01T19:30:12.5Z");
        assert_eq!(value["time_of_day_low_bar"], "2023-06-01T09:05:00.25Z");

        assert_eq!(from_json(&document).unwrap(), snapshot);
    }

    #[test]
    fn missing_and_unknown_keys_are_tolerated() {
        let parsed = from_json(r#"{"barometer": 30.05, "success": "true"}"#).unwrap();
        assert_eq!(parsed.current.barometer, Some(30.05));
        assert_eq!(parsed.current.inside_temperature, None);
        assert_eq!(parsed.units.rain_units, "in");
    }

    #[test]
    fn sentinel_values_parse_as_unset() {
        let parsed = from_json(r#"{"wind_speed": 2147483647, "rain_rate": 1.7976931348623157e308}"#)
            .unwrap();
        assert_eq!(parsed.current.wind_speed, None);
        assert_eq!(parsed.current.rain_rate, None);
    }

    #[test]
    fn malformed_document_yields_diagnostic() {
        let err = from_json("{\"barometer\": ").unwrap_err();
        match err {
            InterchangeError::Malformed { excerpt, line, .. } => {
                assert_eq!(excerpt, "{\"barometer\": ");
                assert_eq!(line, 1);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn wrong_value_type_is_malformed() {
        assert!(matches!(
            from_json(r#"{"bar_trend": "Sideways"}"#),
            Err(InterchangeError::Malformed { .. })
        ));
        assert!(matches!(
            from_json(r#"{"time": "yesterday"}"#),
            Err(InterchangeError::Malformed { .. })
        ));
    }

    #[test]
    fn long_input_excerpt_is_truncated() {
        let document = format!("[{}", "1,".repeat(300));
        let err = from_json(&document).unwrap_err();
        let InterchangeError::Malformed { excerpt, .. } = err else {
            panic!("expected malformed document");
        };
        assert_eq!(excerpt.chars().count(), EXCERPT_LIMIT + 3);
        assert!(excerpt.ends_with("..."));
    }
}
