/// Tab-separated human-readable rendering of a snapshot
use crate::models::WeatherSnapshot;

use super::sentinel::{float_text, int_text, label_text, timestamp_text};

struct Table {
    out: String,
}

impl Table {
    fn section(&mut self, title: &str) {
        self.out.push_str(title);
        self.out.push('\n');
    }

    fn row(&mut self, name: &str, value: String) {
        self.out.push_str(name);
        self.out.push('\t');
        self.out.push_str(&value);
        self.out.push('\n');
    }

    fn measured(&mut self, name: &str, value: String, unit: &str) {
        self.row(name, format!("{} {}", value, unit));
    }
}

/// One `name<TAB>value[ unit]` line per field, grouped under section titles.
pub fn to_display_tsv(snapshot: &WeatherSnapshot) -> String {
    let WeatherSnapshot {
        station,
        derived,
        units,
        current,
        accumulators,
        extremes,
        forecast,
    } = snapshot;

    let temp = units.temperature_units.as_str();
    let hum = units.humidity_units.as_str();
    let speed = units.wind_speed_units.as_str();
    let dir = units.wind_direction_units.as_str();
    let rain = units.rain_units.as_str();
    let rate = units.rain_rate_units.as_str();
    let bar = units.barometer_units.as_str();

    let mut t = Table { out: String::new() };

    t.row("system_name", label_text(station.system_name.as_ref()));
    t.row("time", timestamp_text(station.time.as_ref()));

    t.section("Temperatures");
    t.measured("outside_temperature", float_text(current.outside_temperature), temp);
    t.measured("day_low_out_temp", float_text(extremes.day_low_out_temp), temp);
    t.row("time_day_low_out_temp", timestamp_text(extremes.time_day_low_out_temp.as_ref()));
    t.measured("day_hi_out_temp", float_text(extremes.day_hi_out_temp), temp);
    t.row("time_day_hi_out_temp", timestamp_text(extremes.time_day_hi_out_temp.as_ref()));
    t.measured("month_hi_out_temp", float_text(extremes.month_hi_out_temp), temp);
    t.measured("month_low_out_temp", float_text(extremes.month_low_out_temp), temp);
    t.measured("year_hi_out_temp", float_text(extremes.year_hi_out_temp), temp);
    t.measured("year_low_out_temp", float_text(extremes.year_low_out_temp), temp);
    t.measured("inside_temperature", float_text(current.inside_temperature), temp);
    t.measured("day_hi_inside_temp", float_text(extremes.day_hi_inside_temp), temp);
    t.row("time_day_hi_in_temp", timestamp_text(extremes.time_day_hi_in_temp.as_ref()));
    t.measured("day_low_inside_temp", float_text(extremes.day_low_inside_temp), temp);
    t.row("time_day_low_in_temp", timestamp_text(extremes.time_day_low_in_temp.as_ref()));
    t.measured("month_low_in_temp", float_text(extremes.month_low_in_temp), temp);
    t.measured("month_hi_in_temp", float_text(extremes.month_hi_in_temp), temp);
    t.measured("year_low_in_temp", float_text(extremes.year_low_in_temp), temp);
    t.measured("year_hi_in_temp", float_text(extremes.year_hi_in_temp), temp);

    t.section("Humidity");
    t.measured("outside_humidity", int_text(current.outside_humidity), hum);
    t.measured("day_low_humidity", int_text(extremes.day_low_humidity), hum);
    t.row("time_day_low_humidity", timestamp_text(extremes.time_day_low_humidity.as_ref()));
    t.measured("day_hi_humidity", int_text(extremes.day_hi_humidity), hum);
    t.row("time_day_hi_humidity", timestamp_text(extremes.time_day_hi_humidity.as_ref()));
    t.measured("month_hi_humidity", int_text(extremes.month_hi_humidity), hum);
    t.measured("month_low_humidity", int_text(extremes.month_low_humidity), hum);
    t.measured("year_hi_humidity", int_text(extremes.year_hi_humidity), hum);
    t.measured("year_low_humidity", int_text(extremes.year_low_humidity), hum);
    t.measured("dew_point", int_text(current.dew_point), temp);
    t.measured("heat_index", int_text(current.heat_index), temp);
    t.row("heat_index_derived", float_text(derived.heat_index_derived));
    t.measured("day_high_heat", int_text(extremes.day_high_heat), temp);
    t.row("time_of_day_high_heat", timestamp_text(extremes.time_of_day_high_heat.as_ref()));
    t.measured("month_high_heat", int_text(extremes.month_high_heat), temp);
    t.measured("year_high_heat", int_text(extremes.year_high_heat), temp);
    t.measured("day_low_dew_point", int_text(extremes.day_low_dew_point), temp);
    t.row("time_day_low_dew_point", timestamp_text(extremes.time_day_low_dew_point.as_ref()));
    t.measured("day_hi_dew_point", int_text(extremes.day_hi_dew_point), temp);
    t.row("time_day_hi_dew_point", timestamp_text(extremes.time_day_hi_dew_point.as_ref()));
    t.measured("month_hi_dew_point", int_text(extremes.month_hi_dew_point), temp);
    t.measured("month_low_dew_point", int_text(extremes.month_low_dew_point), temp);
    t.measured("year_hi_dew_point", int_text(extremes.year_hi_dew_point), temp);
    t.measured("year_low_dew_point", int_text(extremes.year_low_dew_point), temp);
    t.measured("inside_humidity", int_text(current.inside_humidity), hum);
    t.measured("day_hi_in_hum", int_text(extremes.day_hi_in_hum), hum);
    t.row("time_day_hi_in_hum", timestamp_text(extremes.time_day_hi_in_hum.as_ref()));
    t.measured("day_low_in_hum", int_text(extremes.day_low_in_hum), hum);
    t.row("time_day_low_in_hum", timestamp_text(extremes.time_day_low_in_hum.as_ref()));
    t.measured("month_hi_in_hum", int_text(extremes.month_hi_in_hum), hum);
    t.measured("month_low_in_hum", int_text(extremes.month_low_in_hum), hum);
    t.measured("year_hi_in_hum", int_text(extremes.year_hi_in_hum), hum);
    t.measured("year_low_in_hum", int_text(extremes.year_low_in_hum), hum);

    t.section("Wind");
    t.measured("wind_speed", int_text(current.wind_speed), speed);
    t.measured("wind_direction", int_text(current.wind_direction), dir);
    t.measured("ten_min_avg_wind_speed", float_text(current.ten_min_avg_wind_speed), speed);
    t.measured("two_min_avg_wind_speed", float_text(current.two_min_avg_wind_speed), speed);
    t.measured("ten_min_wind_gust", float_text(current.ten_min_wind_gust), speed);
    t.measured(
        "dir_ten_min_wind_gust",
        int_text(current.wind_direction_of_ten_min_wind_gust),
        dir,
    );
    t.measured("wind_chill", int_text(current.wind_chill), temp);
    t.row("wind_chill_derived", float_text(derived.wind_chill_derived));
    t.measured("daily_hi_wind_speed", int_text(extremes.daily_hi_wind_speed), speed);
    t.row("time_of_hi_speed", timestamp_text(extremes.time_of_hi_speed.as_ref()));
    t.measured("month_hi_wind_speed", int_text(extremes.month_hi_wind_speed), speed);
    t.measured("year_hi_wind_speed", int_text(extremes.year_hi_wind_speed), speed);
    t.measured("day_low_wind_chill", int_text(extremes.day_low_wind_chill), temp);
    t.row("time_day_low_chill", timestamp_text(extremes.time_day_low_chill.as_ref()));
    t.measured("month_low_wind_chill", int_text(extremes.month_low_wind_chill), temp);
    t.measured("year_low_wind_chill", int_text(extremes.year_low_wind_chill), temp);

    t.section("Rain");
    t.measured("storm_rain", float_text(current.storm_rain), rain);
    t.row("start_date_curr_storm", label_text(current.start_date_of_current_storm.as_ref()));
    t.measured("rain_rate", float_text(current.rain_rate), rate);
    t.measured("last_fifteen_min_rain", float_text(current.last_fifteen_min_rain), rain);
    t.measured("last_hour_rain", float_text(current.last_hour_rain), rain);
    t.measured("daily_rain", float_text(current.daily_rain), rain);
    t.measured("daily_et", float_text(current.daily_et), rain);
    t.measured("last_24_hour_rain", float_text(current.last_twenty_four_hour_rain), rain);
    t.measured("month_rain", float_text(accumulators.month_rain), rain);
    t.measured("year_rain", float_text(accumulators.year_rain), rain);
    t.measured("day_high_rain_rate", float_text(extremes.day_high_rain_rate), rate);
    t.row(
        "time_day_hi_rain_rate",
        timestamp_text(extremes.time_of_day_high_rain_rate.as_ref()),
    );
    t.measured("hour_high_rain_rate", float_text(extremes.hour_high_rain_rate), rate);
    t.measured("month_high_rain_rate", float_text(extremes.month_high_rain_rate), rate);
    t.measured("year_high_rain_rate", float_text(extremes.year_high_rain_rate), rate);

    t.section("Barometer");
    t.measured("barometer", float_text(current.barometer), bar);
    t.row("bar_trend", label_text(current.bar_trend.as_ref()));
    t.measured("daily_low_barometer", float_text(extremes.daily_low_barometer), bar);
    t.row("time_of_day_low_bar", timestamp_text(extremes.time_of_day_low_bar.as_ref()));
    t.measured("daily_high_barometer", float_text(extremes.daily_high_barometer), bar);
    t.row("time_of_day_high_bar", timestamp_text(extremes.time_of_day_high_bar.as_ref()));
    t.measured("month_low_bar", float_text(extremes.month_low_bar), bar);
    t.measured("month_high_bar", float_text(extremes.month_high_bar), bar);
    t.measured("year_low_barometer", float_text(extremes.year_low_barometer), bar);
    t.measured("year_high_barometer", float_text(extremes.year_high_barometer), bar);

    t.section("System");
    t.row(
        "station_battery_status",
        label_text(accumulators.transmitter_battery_status.as_ref()),
    );
    t.measured(
        "console_battery_voltage",
        float_text(accumulators.console_battery_voltage),
        &units.console_battery_voltage_units,
    );

    t.section("Forecast");
    t.row("period_1_forecast_icon", label_text(forecast.period_1_forecast_icon.as_ref()));
    t.row("period_1_short_forecast", label_text(forecast.period_1_short_forecast.as_ref()));

    t.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BarTrend, StormDate};

    fn line<'a>(rendered: &'a str, name: &str) -> &'a str {
        rendered
            .lines()
            .find(|line| line.split('\t').next() == Some(name))
            .unwrap_or_else(|| panic!("no {name} line"))
    }

    #[test]
    fn unset_snapshot_renders_sentinels() {
        let rendered = to_display_tsv(&WeatherSnapshot::new());
        assert!(rendered.starts_with("system_name\tN/A\ntime\tN/A\nTemperatures\n"));
        assert_eq!(
            line(&rendered, "outside_temperature"),
            "outside_temperature\t1.7976931348623157E308 &#x00B0;F"
        );
        assert_eq!(
            line(&rendered, "outside_humidity"),
            "outside_humidity\t2147483647 %"
        );
        assert_eq!(line(&rendered, "bar_trend"), "bar_trend\tN/A");
        assert!(rendered.ends_with("period_1_short_forecast\tN/A\n"));
    }

    #[test]
    fn values_carry_unit_suffixes() {
        let mut snapshot = WeatherSnapshot::new();
        snapshot.current.barometer = Some(29.921);
        snapshot.current.bar_trend = Some(BarTrend::RisingSlowly);
        snapshot.current.wind_direction = Some(270);
        snapshot.current.start_date_of_current_storm = Some(StormDate {
            year: 2023,
            month: 3,
            day: 7,
        });
        snapshot.derived.wind_chill_derived = Some(8.5);

        let rendered = to_display_tsv(&snapshot);
        assert_eq!(line(&rendered, "barometer"), "barometer\t29.921 in Hg");
        assert_eq!(line(&rendered, "bar_trend"), "bar_trend\tRising Slowly");
        assert_eq!(line(&rendered, "wind_direction"), "wind_direction\t270 &#x00B0;");
        assert_eq!(
            line(&rendered, "start_date_curr_storm"),
            "start_date_curr_storm\t2023-3-7"
        );
        assert_eq!(line(&rendered, "wind_chill_derived"), "wind_chill_derived\t8.5");
    }

    #[test]
    fn sections_in_order() {
        let rendered = to_display_tsv(&WeatherSnapshot::new());
        let titles: Vec<&str> = rendered.lines().filter(|l| !l.contains('\t')).collect();
        assert_eq!(
            titles,
            ["Temperatures", "Humidity", "Wind", "Rain", "Barometer", "System", "Forecast"]
        );
    }
}
