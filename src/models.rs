use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

use crate::serialization::sentinel;

/// A textual field value that matches none of the known labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized value {0:?}")]
pub struct UnrecognizedValue(pub String);

/// Start date of the current storm as packed by the console.
///
/// No calendar validation is applied: a console with no storm in progress
/// reports `0xFFFF`, which unpacks to month 15, day 31 of 2127.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StormDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl fmt::Display for StormDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

impl FromStr for StormDate {
    type Err = UnrecognizedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || UnrecognizedValue(s.to_string());
        let mut parts = s.splitn(3, '-');
        let mut next = || parts.next().ok_or_else(invalid);

        let year = next()?.parse().map_err(|_| invalid())?;
        let month = next()?.parse().map_err(|_| invalid())?;
        let day = next()?.parse().map_err(|_| invalid())?;

        Ok(StormDate { year, month, day })
    }
}

/// Three-hour barometric tendency reported in LOOP2 byte 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarTrend {
    FallingRapidly,
    FallingSlowly,
    Steady,
    RisingSlowly,
    RisingRapidly,
}

impl BarTrend {
    const ALL: [BarTrend; 5] = [
        BarTrend::FallingRapidly,
        BarTrend::FallingSlowly,
        BarTrend::Steady,
        BarTrend::RisingSlowly,
        BarTrend::RisingRapidly,
    ];

    /// Map the console's signed trend code. Codes outside the table mean
    /// the console has no trend yet.
    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            -60 => Some(BarTrend::FallingRapidly),
            -20 => Some(BarTrend::FallingSlowly),
            0 => Some(BarTrend::Steady),
            20 => Some(BarTrend::RisingSlowly),
            60 => Some(BarTrend::RisingRapidly),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BarTrend::FallingRapidly => "Falling Rapidly",
            BarTrend::FallingSlowly => "Falling Slowly",
            BarTrend::Steady => "Steady",
            BarTrend::RisingSlowly => "Rising Slowly",
            BarTrend::RisingRapidly => "Rising Rapidly",
        }
    }
}

impl fmt::Display for BarTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BarTrend {
    type Err = UnrecognizedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BarTrend::ALL
            .into_iter()
            .find(|trend| trend.label() == s)
            .ok_or_else(|| UnrecognizedValue(s.to_string()))
    }
}

/// Battery state of the wireless sensor suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatteryStatus {
    Ok,
    Low,
}

impl fmt::Display for BatteryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BatteryStatus::Ok => "OK",
            BatteryStatus::Low => "LOW",
        })
    }
}

impl FromStr for BatteryStatus {
    type Err = UnrecognizedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OK" => Ok(BatteryStatus::Ok),
            "LOW" => Ok(BatteryStatus::Low),
            _ => Err(UnrecognizedValue(s.to_string())),
        }
    }
}

/// Overwrite each listed field of `$dst` whose counterpart in `$src` is set.
macro_rules! merge_set_fields {
    ($dst:expr, $src:expr, [$($field:ident),* $(,)?]) => {
        $(
            if $src.$field.is_some() {
                $dst.$field.clone_from(&$src.$field);
            }
        )*
    };
}

/// Station identity and link statistics, maintained by the polling loop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationInfo {
    #[serde(with = "sentinel::label")]
    pub system_name: Option<String>,
    /// When the readings were captured (whole seconds).
    #[serde(with = "sentinel::timestamp")]
    pub time: Option<OffsetDateTime>,
    #[serde(with = "sentinel::int")]
    pub wrd: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub total_packets_received: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub total_packets_missed: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub number_of_resynchronizations: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub largest_number_packets_received_in_a_row: Option<i32>,
    #[serde(rename = "number_of_CRC_errors_detected", with = "sentinel::int")]
    pub number_of_crc_errors_detected: Option<i32>,
    #[serde(with = "sentinel::label")]
    pub firmware_date_code: Option<String>,
    #[serde(with = "sentinel::label")]
    pub firmware_version: Option<String>,
    #[serde(rename = "DID", with = "sentinel::label")]
    pub did: Option<String>,
}

impl StationInfo {
    fn merge_from(&mut self, other: &Self) {
        merge_set_fields!(
            self,
            other,
            [
                system_name,
                time,
                wrd,
                total_packets_received,
                total_packets_missed,
                number_of_resynchronizations,
                largest_number_packets_received_in_a_row,
                number_of_crc_errors_detected,
                firmware_date_code,
                firmware_version,
                did,
            ]
        );
    }
}

/// Instantaneous readings carried by a LOOP2 packet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentConditions {
    #[serde(with = "sentinel::label")]
    pub bar_trend: Option<BarTrend>,
    #[serde(with = "sentinel::float")]
    pub barometer: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub inside_temperature: Option<f64>,
    #[serde(with = "sentinel::int")]
    pub inside_humidity: Option<i32>,
    #[serde(with = "sentinel::float")]
    pub outside_temperature: Option<f64>,
    #[serde(with = "sentinel::int")]
    pub wind_speed: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub wind_direction: Option<i32>,
    #[serde(with = "sentinel::float")]
    pub ten_min_avg_wind_speed: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub two_min_avg_wind_speed: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub ten_min_wind_gust: Option<f64>,
    #[serde(with = "sentinel::int")]
    pub wind_direction_of_ten_min_wind_gust: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub dew_point: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub outside_humidity: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub heat_index: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub wind_chill: Option<i32>,
    #[serde(with = "sentinel::float")]
    pub rain_rate: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub storm_rain: Option<f64>,
    #[serde(with = "sentinel::label")]
    pub start_date_of_current_storm: Option<StormDate>,
    #[serde(with = "sentinel::float")]
    pub daily_rain: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub last_fifteen_min_rain: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub last_hour_rain: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub daily_et: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub last_twenty_four_hour_rain: Option<f64>,
}

impl CurrentConditions {
    fn merge_from(&mut self, other: &Self) {
        merge_set_fields!(
            self,
            other,
            [
                bar_trend,
                barometer,
                inside_temperature,
                inside_humidity,
                outside_temperature,
                wind_speed,
                wind_direction,
                ten_min_avg_wind_speed,
                two_min_avg_wind_speed,
                ten_min_wind_gust,
                wind_direction_of_ten_min_wind_gust,
                dew_point,
                outside_humidity,
                heat_index,
                wind_chill,
                rain_rate,
                storm_rain,
                start_date_of_current_storm,
                daily_rain,
                last_fifteen_min_rain,
                last_hour_rain,
                daily_et,
                last_twenty_four_hour_rain,
            ]
        );
    }
}

/// Running totals and battery state carried by a LOOP packet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Accumulators {
    #[serde(with = "sentinel::float")]
    pub month_rain: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub year_rain: Option<f64>,
    #[serde(with = "sentinel::label")]
    pub transmitter_battery_status: Option<BatteryStatus>,
    #[serde(with = "sentinel::float")]
    pub console_battery_voltage: Option<f64>,
}

impl Accumulators {
    fn merge_from(&mut self, other: &Self) {
        merge_set_fields!(
            self,
            other,
            [
                month_rain,
                year_rain,
                transmitter_battery_status,
                console_battery_voltage,
            ]
        );
    }
}

/// Daily, monthly and yearly extremes carried by a HILOWS packet.
///
/// Times of occurrence are anchored on the local date at decode time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extremes {
    #[serde(with = "sentinel::float")]
    pub daily_low_barometer: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub daily_high_barometer: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub month_low_bar: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub month_high_bar: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub year_low_barometer: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub year_high_barometer: Option<f64>,
    #[serde(with = "sentinel::timestamp")]
    pub time_of_day_low_bar: Option<OffsetDateTime>,
    #[serde(with = "sentinel::timestamp")]
    pub time_of_day_high_bar: Option<OffsetDateTime>,

    #[serde(with = "sentinel::int")]
    pub daily_hi_wind_speed: Option<i32>,
    #[serde(with = "sentinel::timestamp")]
    pub time_of_hi_speed: Option<OffsetDateTime>,
    #[serde(with = "sentinel::int")]
    pub month_hi_wind_speed: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub year_hi_wind_speed: Option<i32>,

    #[serde(with = "sentinel::float")]
    pub day_hi_inside_temp: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub day_low_inside_temp: Option<f64>,
    #[serde(with = "sentinel::timestamp")]
    pub time_day_hi_in_temp: Option<OffsetDateTime>,
    #[serde(with = "sentinel::timestamp")]
    pub time_day_low_in_temp: Option<OffsetDateTime>,
    #[serde(with = "sentinel::float")]
    pub month_low_in_temp: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub month_hi_in_temp: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub year_low_in_temp: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub year_hi_in_temp: Option<f64>,

    #[serde(with = "sentinel::int")]
    pub day_hi_in_hum: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub day_low_in_hum: Option<i32>,
    #[serde(with = "sentinel::timestamp")]
    pub time_day_hi_in_hum: Option<OffsetDateTime>,
    #[serde(with = "sentinel::timestamp")]
    pub time_day_low_in_hum: Option<OffsetDateTime>,
    #[serde(with = "sentinel::int")]
    pub month_hi_in_hum: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub month_low_in_hum: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub year_hi_in_hum: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub year_low_in_hum: Option<i32>,

    #[serde(with = "sentinel::float")]
    pub day_low_out_temp: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub day_hi_out_temp: Option<f64>,
    #[serde(with = "sentinel::timestamp")]
    pub time_day_low_out_temp: Option<OffsetDateTime>,
    #[serde(with = "sentinel::timestamp")]
    pub time_day_hi_out_temp: Option<OffsetDateTime>,
    #[serde(with = "sentinel::float")]
    pub month_hi_out_temp: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub month_low_out_temp: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub year_hi_out_temp: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub year_low_out_temp: Option<f64>,

    #[serde(with = "sentinel::int")]
    pub day_low_dew_point: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub day_hi_dew_point: Option<i32>,
    #[serde(with = "sentinel::timestamp")]
    pub time_day_low_dew_point: Option<OffsetDateTime>,
    #[serde(with = "sentinel::timestamp")]
    pub time_day_hi_dew_point: Option<OffsetDateTime>,
    #[serde(with = "sentinel::int")]
    pub month_hi_dew_point: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub month_low_dew_point: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub year_hi_dew_point: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub year_low_dew_point: Option<i32>,

    #[serde(with = "sentinel::int")]
    pub day_low_wind_chill: Option<i32>,
    #[serde(with = "sentinel::timestamp")]
    pub time_day_low_chill: Option<OffsetDateTime>,
    #[serde(with = "sentinel::int")]
    pub month_low_wind_chill: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub year_low_wind_chill: Option<i32>,

    #[serde(with = "sentinel::int")]
    pub day_high_heat: Option<i32>,
    #[serde(with = "sentinel::timestamp")]
    pub time_of_day_high_heat: Option<OffsetDateTime>,
    #[serde(with = "sentinel::int")]
    pub month_high_heat: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub year_high_heat: Option<i32>,

    #[serde(with = "sentinel::float")]
    pub day_high_rain_rate: Option<f64>,
    #[serde(with = "sentinel::timestamp")]
    pub time_of_day_high_rain_rate: Option<OffsetDateTime>,
    #[serde(with = "sentinel::float")]
    pub hour_high_rain_rate: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub month_high_rain_rate: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub year_high_rain_rate: Option<f64>,

    #[serde(with = "sentinel::int")]
    pub day_low_humidity: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub day_hi_humidity: Option<i32>,
    #[serde(with = "sentinel::timestamp")]
    pub time_day_low_humidity: Option<OffsetDateTime>,
    #[serde(with = "sentinel::timestamp")]
    pub time_day_hi_humidity: Option<OffsetDateTime>,
    #[serde(with = "sentinel::int")]
    pub month_hi_humidity: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub month_low_humidity: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub year_hi_humidity: Option<i32>,
    #[serde(with = "sentinel::int")]
    pub year_low_humidity: Option<i32>,
}

impl Extremes {
    fn merge_from(&mut self, other: &Self) {
        merge_set_fields!(
            self,
            other,
            [
                daily_low_barometer,
                daily_high_barometer,
                month_low_bar,
                month_high_bar,
                year_low_barometer,
                year_high_barometer,
                time_of_day_low_bar,
                time_of_day_high_bar,
                daily_hi_wind_speed,
                time_of_hi_speed,
                month_hi_wind_speed,
                year_hi_wind_speed,
                day_hi_inside_temp,
                day_low_inside_temp,
                time_day_hi_in_temp,
                time_day_low_in_temp,
                month_low_in_temp,
                month_hi_in_temp,
                year_low_in_temp,
                year_hi_in_temp,
                day_hi_in_hum,
                day_low_in_hum,
                time_day_hi_in_hum,
                time_day_low_in_hum,
                month_hi_in_hum,
                month_low_in_hum,
                year_hi_in_hum,
                year_low_in_hum,
                day_low_out_temp,
                day_hi_out_temp,
                time_day_low_out_temp,
                time_day_hi_out_temp,
                month_hi_out_temp,
                month_low_out_temp,
                year_hi_out_temp,
                year_low_out_temp,
                day_low_dew_point,
                day_hi_dew_point,
                time_day_low_dew_point,
                time_day_hi_dew_point,
                month_hi_dew_point,
                month_low_dew_point,
                year_hi_dew_point,
                year_low_dew_point,
                day_low_wind_chill,
                time_day_low_chill,
                month_low_wind_chill,
                year_low_wind_chill,
                day_high_heat,
                time_of_day_high_heat,
                month_high_heat,
                year_high_heat,
                day_high_rain_rate,
                time_of_day_high_rain_rate,
                hour_high_rain_rate,
                month_high_rain_rate,
                year_high_rain_rate,
                day_low_humidity,
                day_hi_humidity,
                time_day_low_humidity,
                time_day_hi_humidity,
                month_hi_humidity,
                month_low_humidity,
                year_hi_humidity,
                year_low_humidity,
            ]
        );
    }
}

/// Comfort metrics computed locally rather than reported by the console.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Derived {
    #[serde(with = "sentinel::float")]
    pub heat_index_derived: Option<f64>,
    #[serde(with = "sentinel::float")]
    pub wind_chill_derived: Option<f64>,
}

impl Derived {
    fn merge_from(&mut self, other: &Self) {
        merge_set_fields!(self, other, [heat_index_derived, wind_chill_derived]);
    }
}

/// Forecast text attached by an external forecast source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forecast {
    #[serde(with = "sentinel::label")]
    pub forecast_location_coordinates: Option<String>,
    #[serde(with = "sentinel::label")]
    pub forecast_location_city: Option<String>,
    #[serde(with = "sentinel::label")]
    pub forecast_location_state: Option<String>,
    #[serde(with = "sentinel::label")]
    pub period_1_forecast_icon: Option<String>,
    #[serde(with = "sentinel::label")]
    pub period_1_short_forecast: Option<String>,
}

impl Forecast {
    fn merge_from(&mut self, other: &Self) {
        merge_set_fields!(
            self,
            other,
            [
                forecast_location_coordinates,
                forecast_location_city,
                forecast_location_state,
                period_1_forecast_icon,
                period_1_short_forecast,
            ]
        );
    }
}

/// Display suffixes per physical quantity. The degree sign is kept as an
/// HTML entity because the web front end inserts these verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Units {
    pub barometer_units: String,
    pub temperature_units: String,
    pub humidity_units: String,
    pub wind_speed_units: String,
    pub wind_direction_units: String,
    pub rain_units: String,
    pub rain_rate_units: String,
    pub console_battery_voltage_units: String,
}

impl Default for Units {
    fn default() -> Self {
        Units {
            barometer_units: "in Hg".to_string(),
            temperature_units: "&#x00B0;F".to_string(),
            humidity_units: "%".to_string(),
            wind_speed_units: "MPH".to_string(),
            wind_direction_units: "&#x00B0;".to_string(),
            rain_units: "in".to_string(),
            rain_rate_units: "in/hr".to_string(),
            console_battery_voltage_units: "Volts".to_string(),
        }
    }
}

/// Everything known about one station.
///
/// Each group has exactly one writer: the LOOP2 decoder owns `current`,
/// LOOP owns `accumulators`, HILOWS owns `extremes`, the derived metrics own
/// `derived`, and the caller owns `station` and `forecast`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSnapshot {
    #[serde(flatten)]
    pub station: StationInfo,
    #[serde(flatten)]
    pub derived: Derived,
    #[serde(flatten)]
    pub units: Units,
    #[serde(flatten)]
    pub current: CurrentConditions,
    #[serde(flatten)]
    pub accumulators: Accumulators,
    #[serde(flatten)]
    pub extremes: Extremes,
    #[serde(flatten)]
    pub forecast: Forecast,
}

impl WeatherSnapshot {
    /// A snapshot with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record when these readings were captured, dropping sub-second precision.
    pub fn stamp(&mut self, at: OffsetDateTime) {
        self.station.time = Some(at.replace_nanosecond(0).unwrap_or(at));
    }

    /// Copy every set field of `update` over this snapshot. Fields unset in
    /// `update` keep their current value; units always follow `update`.
    pub fn merge_from(&mut self, update: &WeatherSnapshot) {
        self.station.merge_from(&update.station);
        self.derived.merge_from(&update.derived);
        self.current.merge_from(&update.current);
        self.accumulators.merge_from(&update.accumulators);
        self.extremes.merge_from(&update.extremes);
        self.forecast.merge_from(&update.forecast);
        self.units.clone_from(&update.units);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn fresh_snapshot_is_unset() {
        let snapshot = WeatherSnapshot::new();
        assert_eq!(snapshot.current, CurrentConditions::default());
        assert_eq!(snapshot.station.time, None);
        assert_eq!(snapshot.current.barometer, None);
        assert_eq!(snapshot.extremes.time_of_hi_speed, None);
        assert_eq!(snapshot.units.barometer_units, "in Hg");
    }

    #[test]
    fn bar_trend_table() {
        assert_eq!(BarTrend::from_code(-60), Some(BarTrend::FallingRapidly));
        assert_eq!(BarTrend::from_code(-20), Some(BarTrend::FallingSlowly));
        assert_eq!(BarTrend::from_code(0), Some(BarTrend::Steady));
        assert_eq!(BarTrend::from_code(20), Some(BarTrend::RisingSlowly));
        assert_eq!(BarTrend::from_code(60), Some(BarTrend::RisingRapidly));
        assert_eq!(BarTrend::from_code(80), None);
        assert_eq!(BarTrend::from_code(-1), None);
        assert_eq!("Rising Slowly".parse(), Ok(BarTrend::RisingSlowly));
        assert!("rising slowly".parse::<BarTrend>().is_err());
    }

    #[test]
    fn storm_date_text_form() {
        let date = StormDate {
            year: 2023,
            month: 3,
            day: 7,
        };
        assert_eq!(date.to_string(), "2023-3-7");
        assert_eq!("2023-3-7".parse(), Ok(date));
        assert_eq!(
            "2127-15-31".parse(),
            Ok(StormDate {
                year: 2127,
                month: 15,
                day: 31,
            })
        );
        assert!("2023-3".parse::<StormDate>().is_err());
        assert!("2023-x-7".parse::<StormDate>().is_err());
    }

    #[test]
    fn battery_status_labels() {
        assert_eq!(BatteryStatus::Low.to_string(), "LOW");
        assert_eq!("OK".parse(), Ok(BatteryStatus::Ok));
        assert!("ok".parse::<BatteryStatus>().is_err());
    }

    #[test]
    fn merge_keeps_fields_unset_in_update() {
        let mut published = WeatherSnapshot::new();
        published.current.barometer = Some(29.9);
        published.accumulators.month_rain = Some(1.25);

        let mut update = WeatherSnapshot::new();
        update.current.barometer = Some(30.1);
        update.extremes.year_hi_wind_speed = Some(48);

        published.merge_from(&update);

        assert_eq!(published.current.barometer, Some(30.1));
        assert_eq!(published.accumulators.month_rain, Some(1.25));
        assert_eq!(published.extremes.year_hi_wind_speed, Some(48));
    }

    #[test]
    fn stamp_truncates_to_seconds() {
        let mut snapshot = WeatherSnapshot::new();
        snapshot.stamp(datetime!(2023-06-01 12:00:05.750 UTC));
        assert_eq!(snapshot.station.time, Some(datetime!(2023-06-01 12:00:05 UTC)));
    }
}
