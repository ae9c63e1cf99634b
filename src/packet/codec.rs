/// Primitive field conversions for console packets
///
/// Offsets are trusted: callers validate packet length before reading.
use time::{Duration, OffsetDateTime, UtcOffset};

use crate::clock::LocalClock;
use crate::models::StormDate;

/// Little-endian signed 16-bit word at `offset`.
pub fn read_i16_le(buffer: &[u8], offset: usize) -> i16 {
    i16::from_le_bytes([buffer[offset], buffer[offset + 1]])
}

/// Little-endian unsigned 16-bit word at `offset`.
pub fn read_u16_le(buffer: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([buffer[offset], buffer[offset + 1]])
}

/// Unpack a console date word: bits 15-12 month, 11-7 day, 6-0 years since 2000.
pub fn read_date(buffer: &[u8], offset: usize) -> StormDate {
    let bits = read_u16_le(buffer, offset);
    StormDate {
        year: (bits & 0x007F) + 2000,
        month: ((bits & 0xF000) >> 12) as u8,
        day: ((bits & 0x0F80) >> 7) as u8,
    }
}

/// Decode an `HHMM` word as a time on the clock's current local date, in UTC.
///
/// Hours are `floor(value / 100)` and minutes carry the sign of the value, so
/// the console's `0xFFFF` "no data" word lands at 22:59 the previous day.
///
/// Two limitations follow from the word carrying no date or zone. A packet
/// decoded on a later day is anchored to the wrong day. And every time on the
/// anchor date gets the offset the clock reports *now*, so on a daylight
/// saving transition day the times from before the switch come out one hour
/// off.
pub fn read_time<C: LocalClock + ?Sized>(buffer: &[u8], offset: usize, clock: &C) -> OffsetDateTime {
    let value = i64::from(read_i16_le(buffer, offset));
    let hours = value.div_euclid(100);
    let minutes = value % 100;

    let now = clock.now_local();
    let midnight = now.date().midnight();
    let local = midnight + Duration::hours(hours) + Duration::minutes(minutes);

    local.assume_offset(now.offset()).to_offset(UtcOffset::UTC)
}

/// Apply a field's fixed-point divisor.
pub fn scaled(raw: i16, scale: f64) -> f64 {
    f64::from(raw) / scale
}
