/// Utility functions for timestamp and number formatting
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// `2023-06-01T19:30:00Z`, the timestamp form used by every serialization.
const UTC_TIMESTAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

/// Instants with a fractional second: `2023-06-01T19:30:12.5Z`.
const UTC_TIMESTAMP_FRACTIONAL: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]Z");

const UTC_TIMESTAMP_INPUT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]Z"
);

const LOG_DATETIME: &[BorrowedFormatItem<'static>] =
    format_description!("[day].[month].[year] - [hour]:[minute]:[second]");

const UTC_OFFSET: &[BorrowedFormatItem<'static>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");

/// Format a timestamp for human-readable logging
///
/// Converts an OffsetDateTime to DD.MM.YYYY - HH:MM:SS format
/// Falls back to default string representation if formatting fails.
pub fn format_datetime(dt: &OffsetDateTime) -> String {
    dt.format(LOG_DATETIME).unwrap_or_else(|_| dt.to_string())
}

/// Render an instant in UTC as `YYYY-MM-DDTHH:MM:SSZ`. A fractional second,
/// if any, is kept with as many digits as it needs.
pub fn format_utc_timestamp(dt: &OffsetDateTime) -> String {
    let utc = dt.to_offset(UtcOffset::UTC);
    let format = if utc.nanosecond() == 0 {
        UTC_TIMESTAMP
    } else {
        UTC_TIMESTAMP_FRACTIONAL
    };
    utc.format(format).unwrap_or_else(|_| utc.to_string())
}

/// Inverse of [`format_utc_timestamp`].
pub fn parse_utc_timestamp(text: &str) -> Result<OffsetDateTime, time::error::Parse> {
    PrimitiveDateTime::parse(text, UTC_TIMESTAMP_INPUT).map(PrimitiveDateTime::assume_utc)
}

/// Parse a `+HH:MM` / `-HH:MM` offset.
pub fn parse_utc_offset(text: &str) -> Result<UtcOffset, time::error::Parse> {
    UtcOffset::parse(text.trim(), UTC_OFFSET)
}

/// Render a decoded quantity the way the station's historical records do:
/// shortest round-trip form, always with a fractional part (`5.0`, `29.921`).
///
/// Magnitudes below 1e-4 or from 1e16 up print in exponent form (`1e-5`,
/// `1e16`); everything in between stays positional. The historical records
/// switch to `1.0E-4` style outside [1e-3, 1e7), so tiny derived values and
/// large counts are spelled differently there. Decoded quantities never reach
/// either range. Only the unset sentinel uses the `E308` spelling.
pub fn format_decimal(value: f64) -> String {
    format!("{:?}", value)
}

/// Convert a time::Duration to seconds as u64
pub fn duration_to_seconds(duration: time::Duration) -> u64 {
    duration.whole_seconds().max(0) as u64
}
