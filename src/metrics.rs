/// Heat index and wind chill per the US National Weather Service formulas
///
/// Inputs are degrees Fahrenheit, percent relative humidity and miles per
/// hour. Evaluation order matches the station's historical records so results
/// are bit-identical.
use crate::models::WeatherSnapshot;

/// Heat index in °F.
///
/// At or below 40 °F the temperature is returned unchanged. Otherwise the
/// simplified formula is used, switching to the Rothfusz regression (with its
/// low- and high-humidity adjustments) when the simple result exceeds 79.
pub fn heat_index(temperature: f64, humidity: f64) -> f64 {
    if temperature <= 40.0 {
        return temperature;
    }

    let simple = 0.5 * (temperature + 61.0 + ((temperature - 68.0) * 1.2) + (humidity * 0.094));
    if simple <= 79.0 {
        return simple;
    }

    let mut index = -42.379
        + (2.04901523 * temperature)
        + (10.14333127 * humidity)
        - (0.22475541 * temperature * humidity)
        - (0.00683783 * temperature * temperature)
        - (0.05481717 * humidity * humidity)
        + (0.00122874 * temperature * temperature * humidity)
        + (0.00085282 * temperature * humidity * humidity)
        - (0.00000199 * temperature * temperature * humidity * humidity);

    if humidity < 13.0 && (80.0..=112.0).contains(&temperature) {
        index -= ((13.0 - humidity) / 4.0) * ((17.0 - (temperature - 95.0).abs()) / 17.0).sqrt();
    } else if humidity > 85.0 && (80.0..=87.0).contains(&temperature) {
        index += ((humidity - 85.0) / 10.0) * ((87.0 - temperature) / 5.0);
    }

    index
}

/// Wind chill in °F. Above 50 °F or at 3 MPH and below the temperature is
/// returned unchanged.
pub fn wind_chill(temperature: f64, wind_speed: f64) -> f64 {
    if temperature > 50.0 || wind_speed <= 3.0 {
        return temperature;
    }

    35.74 + (0.6215 * temperature) - (35.75 * wind_speed.powf(0.16))
        + (0.4275 * temperature * wind_speed.powf(0.16))
}

/// Recompute the snapshot's derived metrics from its current outside
/// readings. A metric whose inputs are not all set is left untouched.
pub fn apply_derived(snapshot: &mut WeatherSnapshot) {
    let current = &snapshot.current;
    let Some(temperature) = current.outside_temperature else {
        return;
    };

    if let Some(humidity) = current.outside_humidity {
        snapshot.derived.heat_index_derived = Some(heat_index(temperature, f64::from(humidity)));
    }
    if let Some(speed) = current.wind_speed {
        snapshot.derived.wind_chill_derived = Some(wind_chill(temperature, f64::from(speed)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn heat_index_passes_through_when_cool() {
        assert_eq!(heat_index(40.0, 50.0), 40.0);
        assert_eq!(heat_index(-3.5, 90.0), -3.5);
    }

    #[test]
    fn heat_index_simple_formula_below_threshold() {
        assert_close(heat_index(70.0, 50.0), 69.05);
    }

    #[test]
    fn heat_index_rothfusz_regression() {
        assert_close(heat_index(90.0, 70.0), 105.922021);
    }

    #[test]
    fn heat_index_low_humidity_adjustment() {
        assert_close(heat_index(100.0, 10.0), 94.122483);
    }

    #[test]
    fn heat_index_high_humidity_adjustment() {
        assert_close(heat_index(85.0, 90.0), 101.780804);
    }

    #[test]
    fn wind_chill_passes_through() {
        assert_eq!(wind_chill(60.0, 20.0), 60.0);
        assert_eq!(wind_chill(20.0, 3.0), 20.0);
    }

    #[test]
    fn wind_chill_nws_formula() {
        assert_close(wind_chill(20.0, 10.0), 8.854038);
    }

    #[test]
    fn derived_metrics_need_inputs() {
        let mut snapshot = WeatherSnapshot::new();
        apply_derived(&mut snapshot);
        assert_eq!(snapshot.derived.heat_index_derived, None);

        snapshot.current.outside_temperature = Some(20.0);
        snapshot.current.wind_speed = Some(10);
        apply_derived(&mut snapshot);
        assert_eq!(snapshot.derived.heat_index_derived, None);
        assert_close(snapshot.derived.wind_chill_derived.unwrap(), 8.854038);

        snapshot.current.outside_humidity = Some(50);
        apply_derived(&mut snapshot);
        assert_eq!(snapshot.derived.heat_index_derived, Some(20.0));
    }
}
