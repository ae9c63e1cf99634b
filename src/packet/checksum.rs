/// CRC validation for console packets
///
/// The console appends a CRC-16/XMODEM (polynomial 0x1021, seed 0x0000)
/// of the data bytes to every packet, most significant byte first.
use crate::error::DecodeError;

/// Number of trailing checksum bytes in every packet.
pub const CRC_LEN: usize = 2;

/// CRC-16/XMODEM of `data`.
pub fn crc16(data: &[u8]) -> u16 {
    ::crc16::State::<::crc16::XMODEM>::calculate(data)
}

/// Check the span `buffer[start..start + length]` whose last two bytes are
/// the big-endian CRC of the bytes before them.
///
/// A span that does not fit inside `buffer`, or is too short to hold a
/// checksum, is reported as [`DecodeError::ChecksumMismatch`] against an
/// empty computation since no valid checksum can be read from it.
pub fn verify(buffer: &[u8], start: usize, length: usize) -> Result<(), DecodeError> {
    let span = start
        .checked_add(length)
        .and_then(|end| buffer.get(start..end))
        .filter(|span| span.len() >= CRC_LEN);

    let Some(span) = span else {
        return Err(DecodeError::ChecksumMismatch {
            stored: 0,
            computed: crc16(&[]),
        });
    };

    let (data, trailer) = span.split_at(span.len() - CRC_LEN);
    let stored = u16::from_be_bytes([trailer[0], trailer[1]]);
    let computed = crc16(data);

    if stored == computed {
        Ok(())
    } else {
        Err(DecodeError::ChecksumMismatch { stored, computed })
    }
}
