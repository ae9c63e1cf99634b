/// Source of the station's current local date and offset
///
/// Time-of-extreme words in a HILOWS packet carry only hours and minutes.
/// They are anchored onto whatever local date this clock reports at decode
/// time, so decoding an old packet on a later day yields a timestamp on the
/// wrong day.
use log::warn;
use time::{OffsetDateTime, UtcOffset};

pub trait LocalClock {
    /// Current wall-clock time at the station, carrying the station's offset.
    fn now_local(&self) -> OffsetDateTime;
}

/// Real time at a fixed or detected station offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    pub fn with_offset(offset: UtcOffset) -> Self {
        SystemClock { offset }
    }

    /// Use the host's local offset, falling back to UTC when it cannot be
    /// determined (e.g. once other threads are running on Unix).
    pub fn detect() -> Self {
        let offset = UtcOffset::current_local_offset().unwrap_or_else(|e| {
            warn!("Could not determine local UTC offset ({}), using UTC", e);
            UtcOffset::UTC
        });
        SystemClock { offset }
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }
}

impl LocalClock for SystemClock {
    fn now_local(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl LocalClock for FixedClock {
    fn now_local(&self) -> OffsetDateTime {
        self.0
    }
}
