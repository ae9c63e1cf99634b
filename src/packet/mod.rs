pub mod checksum;
pub mod codec;
pub mod decoder;

use std::fmt;

pub use checksum::{crc16, verify};
pub use decoder::{decode, decode_hilows, decode_loop, decode_loop2};

/// The fixed-format packets the console emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketKind {
    /// Current conditions plus accumulators (`LOOP` command).
    Loop,
    /// Current conditions, second layout (`LPS 2` command).
    Loop2,
    /// Daily, monthly and yearly extremes (`HILOWS` command).
    HiLows,
}

impl PacketKind {
    /// Exact byte count of a packet of this kind, checksum included.
    pub const fn expected_len(self) -> usize {
        match self {
            PacketKind::Loop | PacketKind::Loop2 => 99,
            PacketKind::HiLows => 438,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PacketKind::Loop => "LOOP",
            PacketKind::Loop2 => "LOOP2",
            PacketKind::HiLows => "HILOWS",
        }
    }

    /// Case-insensitive lookup by protocol name.
    pub fn from_name(name: &str) -> Option<Self> {
        [PacketKind::Loop, PacketKind::Loop2, PacketKind::HiLows]
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_case_insensitively() {
        assert_eq!(PacketKind::from_name("loop"), Some(PacketKind::Loop));
        assert_eq!(PacketKind::from_name("Loop2"), Some(PacketKind::Loop2));
        assert_eq!(PacketKind::from_name("HILOWS"), Some(PacketKind::HiLows));
        assert_eq!(PacketKind::from_name("LOOP3"), None);
    }

    #[test]
    fn fixed_sizes() {
        assert_eq!(PacketKind::Loop.expected_len(), 99);
        assert_eq!(PacketKind::Loop2.expected_len(), 99);
        assert_eq!(PacketKind::HiLows.expected_len(), 438);
    }
}
