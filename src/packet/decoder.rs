/// LOOP, LOOP2 and HILOWS packet decoding
///
/// Each decoder validates the whole packet (length, fixed marker bytes,
/// checksum) before touching the snapshot, then replaces the one field group
/// it owns in a single assignment. A rejected packet leaves the snapshot
/// exactly as it was.
///
/// Byte layouts (offsets into the packet, little-endian words):
///
/// LOOP2: 0-2 `"LOO"`, 3 trend code, 4 type `0x01`, 7 barometer (/1000),
/// 9 inside temp (/10), 11 inside humidity, 12 outside temp (/10),
/// 14 wind speed, 16 wind direction, 18 10-min avg wind (/10),
/// 20 2-min avg wind (/10), 22 10-min gust (/10), 24 gust direction,
/// 30 dew point, 33 outside humidity, 35 heat index, 37 wind chill,
/// 41 rain rate (/100), 46 storm rain (/100), 48 storm start date,
/// 50 daily rain (/100), 52 15-min rain (/100), 54 last-hour rain (/100),
/// 56 daily ET (/1000), 58 24-hour rain (/100), 95-96 `\n\r`, 97-98 CRC.
///
/// LOOP: same markers with type `0x00`; 52 month rain (/100),
/// 54 year rain (/100), 86 transmitter battery flags, 87 console voltage.
///
/// HILOWS: no markers; 436 data bytes then the CRC.
use log::debug;

use super::checksum;
use super::codec::{read_date, read_i16_le, read_time, scaled};
use super::PacketKind;
use crate::clock::LocalClock;
use crate::error::DecodeError;
use crate::models::{
    Accumulators, BarTrend, BatteryStatus, CurrentConditions, Extremes, WeatherSnapshot,
};

const LOOP_MARKER: &[u8; 3] = b"LOO";
const TYPE_OFFSET: usize = 4;
const LOOP_TYPE: u8 = 0x00;
const LOOP2_TYPE: u8 = 0x01;
const TRAILER_OFFSET: usize = 95;
const TRAILER: &[u8; 2] = &[0x0A, 0x0D];

// Fixed-point divisors per quantity.
const BAROMETER_SCALE: f64 = 1000.0;
const TEMPERATURE_SCALE: f64 = 10.0;
const WIND_SCALE: f64 = 10.0;
const RAIN_SCALE: f64 = 100.0;
const ET_SCALE: f64 = 1000.0;

/// Decode `packet` as `kind` into `snapshot`.
///
/// The slice length is the declared packet length; pass only the bytes
/// actually received.
pub fn decode<C: LocalClock + ?Sized>(
    kind: PacketKind,
    packet: &[u8],
    snapshot: &mut WeatherSnapshot,
    clock: &C,
) -> Result<(), DecodeError> {
    match kind {
        PacketKind::Loop => decode_loop(packet, snapshot),
        PacketKind::Loop2 => decode_loop2(packet, snapshot),
        PacketKind::HiLows => decode_hilows(packet, snapshot, clock),
    }
}

/// Decode a LOOP packet into the snapshot's accumulators.
pub fn decode_loop(packet: &[u8], snapshot: &mut WeatherSnapshot) -> Result<(), DecodeError> {
    validate(PacketKind::Loop, packet)?;

    let battery_flags = packet[86];
    snapshot.accumulators = Accumulators {
        month_rain: Some(scaled(read_i16_le(packet, 52), RAIN_SCALE)),
        year_rain: Some(scaled(read_i16_le(packet, 54), RAIN_SCALE)),
        transmitter_battery_status: Some(if battery_flags & 0x01 == 0 {
            BatteryStatus::Ok
        } else {
            BatteryStatus::Low
        }),
        console_battery_voltage: Some(f64::from(read_i16_le(packet, 87)) * 300.0 / 512.0 / 100.0),
    };

    debug!("Decoded LOOP packet");
    Ok(())
}

/// Decode a LOOP2 packet into the snapshot's current conditions.
pub fn decode_loop2(packet: &[u8], snapshot: &mut WeatherSnapshot) -> Result<(), DecodeError> {
    validate(PacketKind::Loop2, packet)?;

    let int = |offset| Some(i32::from(read_i16_le(packet, offset)));
    let byte = |offset: usize| Some(i32::from(packet[offset]));
    let fixed = |offset, scale| Some(scaled(read_i16_le(packet, offset), scale));

    snapshot.current = CurrentConditions {
        bar_trend: BarTrend::from_code(packet[3] as i8),
        barometer: fixed(7, BAROMETER_SCALE),
        inside_temperature: fixed(9, TEMPERATURE_SCALE),
        inside_humidity: byte(11),
        outside_temperature: fixed(12, TEMPERATURE_SCALE),
        wind_speed: byte(14),
        wind_direction: int(16),
        ten_min_avg_wind_speed: fixed(18, WIND_SCALE),
        two_min_avg_wind_speed: fixed(20, WIND_SCALE),
        ten_min_wind_gust: fixed(22, WIND_SCALE),
        wind_direction_of_ten_min_wind_gust: int(24),
        dew_point: int(30),
        outside_humidity: byte(33),
        heat_index: int(35),
        wind_chill: int(37),
        rain_rate: fixed(41, RAIN_SCALE),
        storm_rain: fixed(46, RAIN_SCALE),
        start_date_of_current_storm: Some(read_date(packet, 48)),
        daily_rain: fixed(50, RAIN_SCALE),
        last_fifteen_min_rain: fixed(52, RAIN_SCALE),
        last_hour_rain: fixed(54, RAIN_SCALE),
        daily_et: fixed(56, ET_SCALE),
        last_twenty_four_hour_rain: fixed(58, RAIN_SCALE),
    };

    debug!("Decoded LOOP2 packet");
    Ok(())
}

/// Decode a HILOWS packet into the snapshot's extremes.
///
/// Times of occurrence are placed on the clock's current local date.
pub fn decode_hilows<C: LocalClock + ?Sized>(
    packet: &[u8],
    snapshot: &mut WeatherSnapshot,
    clock: &C,
) -> Result<(), DecodeError> {
    validate(PacketKind::HiLows, packet)?;

    let int = |offset| Some(i32::from(read_i16_le(packet, offset)));
    let byte = |offset: usize| Some(i32::from(packet[offset]));
    let fixed = |offset, scale| Some(scaled(read_i16_le(packet, offset), scale));
    let at = |offset| Some(read_time(packet, offset, clock));

    snapshot.extremes = Extremes {
        daily_low_barometer: fixed(0, BAROMETER_SCALE),
        daily_high_barometer: fixed(2, BAROMETER_SCALE),
        month_low_bar: fixed(4, BAROMETER_SCALE),
        month_high_bar: fixed(6, BAROMETER_SCALE),
        year_low_barometer: fixed(8, BAROMETER_SCALE),
        year_high_barometer: fixed(10, BAROMETER_SCALE),
        time_of_day_low_bar: at(12),
        time_of_day_high_bar: at(14),

        daily_hi_wind_speed: byte(16),
        time_of_hi_speed: at(17),
        month_hi_wind_speed: byte(19),
        year_hi_wind_speed: byte(20),

        day_hi_inside_temp: fixed(21, TEMPERATURE_SCALE),
        day_low_inside_temp: fixed(23, TEMPERATURE_SCALE),
        time_day_hi_in_temp: at(25),
        time_day_low_in_temp: at(27),
        month_low_in_temp: fixed(29, TEMPERATURE_SCALE),
        month_hi_in_temp: fixed(31, TEMPERATURE_SCALE),
        year_low_in_temp: fixed(33, TEMPERATURE_SCALE),
        year_hi_in_temp: fixed(35, TEMPERATURE_SCALE),

        day_hi_in_hum: byte(37),
        day_low_in_hum: byte(38),
        time_day_hi_in_hum: at(39),
        time_day_low_in_hum: at(41),
        month_hi_in_hum: byte(43),
        month_low_in_hum: byte(44),
        year_hi_in_hum: byte(45),
        year_low_in_hum: byte(46),

        day_low_out_temp: fixed(47, TEMPERATURE_SCALE),
        day_hi_out_temp: fixed(49, TEMPERATURE_SCALE),
        time_day_low_out_temp: at(51),
        time_day_hi_out_temp: at(53),
        month_hi_out_temp: fixed(55, TEMPERATURE_SCALE),
        month_low_out_temp: fixed(57, TEMPERATURE_SCALE),
        year_hi_out_temp: fixed(59, TEMPERATURE_SCALE),
        year_low_out_temp: fixed(61, TEMPERATURE_SCALE),

        day_low_dew_point: int(63),
        day_hi_dew_point: int(65),
        time_day_low_dew_point: at(67),
        time_day_hi_dew_point: at(69),
        month_hi_dew_point: int(71),
        month_low_dew_point: int(73),
        year_hi_dew_point: int(75),
        year_low_dew_point: int(77),

        day_low_wind_chill: int(79),
        time_day_low_chill: at(81),
        month_low_wind_chill: int(83),
        year_low_wind_chill: int(85),

        day_high_heat: int(87),
        time_of_day_high_heat: at(89),
        month_high_heat: int(91),
        year_high_heat: int(93),

        day_high_rain_rate: fixed(116, RAIN_SCALE),
        time_of_day_high_rain_rate: at(118),
        hour_high_rain_rate: fixed(120, RAIN_SCALE),
        month_high_rain_rate: fixed(122, RAIN_SCALE),
        year_high_rain_rate: fixed(124, RAIN_SCALE),

        // Outside humidity is the first slot of each extra-humidity array.
        day_low_humidity: byte(276),
        day_hi_humidity: byte(284),
        time_day_low_humidity: at(292),
        time_day_hi_humidity: at(308),
        month_hi_humidity: byte(324),
        month_low_humidity: byte(332),
        year_hi_humidity: byte(340),
        year_low_humidity: byte(348),
    };

    debug!("Decoded HILOWS packet");
    Ok(())
}

fn validate(kind: PacketKind, packet: &[u8]) -> Result<(), DecodeError> {
    let expected = kind.expected_len();
    if packet.len() != expected {
        return Err(DecodeError::InvalidLength {
            kind,
            expected,
            actual: packet.len(),
        });
    }

    match kind {
        PacketKind::Loop => check_markers(kind, packet, LOOP_TYPE)?,
        PacketKind::Loop2 => check_markers(kind, packet, LOOP2_TYPE)?,
        PacketKind::HiLows => {}
    }

    checksum::verify(packet, 0, expected)
}

fn check_markers(kind: PacketKind, packet: &[u8], packet_type: u8) -> Result<(), DecodeError> {
    let expected_bytes = LOOP_MARKER
        .iter()
        .enumerate()
        .chain([(TYPE_OFFSET, &packet_type)])
        .chain(
            TRAILER
                .iter()
                .enumerate()
                .map(|(i, byte)| (TRAILER_OFFSET + i, byte)),
        );

    for (offset, &expected) in expected_bytes {
        let actual = packet[offset];
        if actual != expected {
            return Err(DecodeError::InvalidMarker {
                kind,
                offset,
                expected,
                actual,
            });
        }
    }

    Ok(())
}
