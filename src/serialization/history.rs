/// One-line CSV history record of the instantaneous readings
use crate::models::WeatherSnapshot;

use super::sentinel::{float_text, int_text, timestamp_text};

/// Header row matching [`to_history_record`], newline included.
pub const HISTORY_RECORD_COLUMNS: &str = "time,barometer,inside_temperature,inside_humidity,\
outside_temperature,wind_speed,wind_direction,two_min_avg_wind_speed,ten_min_wind_gust,\
wind_direction_of_ten_min_wind_gust,dew_point,outside_humidity,heat_index,wind_chill,\
rain_rate,storm_rain,last_fifteen_min_rain,last_hour_rain,last_twenty_four_hour_rain\n";

/// The 19 history columns, comma separated, newline terminated. No quoting
/// is applied; every column is a number or a timestamp.
pub fn to_history_record(snapshot: &WeatherSnapshot) -> String {
    let current = &snapshot.current;
    let columns = [
        timestamp_text(snapshot.station.time.as_ref()),
        float_text(current.barometer),
        float_text(current.inside_temperature),
        int_text(current.inside_humidity),
        float_text(current.outside_temperature),
        int_text(current.wind_speed),
        int_text(current.wind_direction),
        float_text(current.two_min_avg_wind_speed),
        float_text(current.ten_min_wind_gust),
        int_text(current.wind_direction_of_ten_min_wind_gust),
        int_text(current.dew_point),
        int_text(current.outside_humidity),
        int_text(current.heat_index),
        int_text(current.wind_chill),
        float_text(current.rain_rate),
        float_text(current.storm_rain),
        float_text(current.last_fifteen_min_rain),
        float_text(current.last_hour_rain),
        float_text(current.last_twenty_four_hour_rain),
    ];

    let mut record = columns.join(",");
    record.push('\n');
    record
}
