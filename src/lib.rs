//! Decoder and publisher for Davis Vantage Vue console packets.
//!
//! Raw LOOP, LOOP2 and HILOWS packets are checksum-verified and decoded into
//! a [`WeatherSnapshot`], which can be rendered as a display table, a history
//! CSV row or the JSON interchange document.

pub mod capture;
pub mod clock;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod packet;
pub mod publisher;
pub mod serialization;
pub mod utils;

pub use clock::{FixedClock, LocalClock, SystemClock};
pub use error::{CaptureError, ConfigError, DecodeError, InterchangeError};
pub use models::WeatherSnapshot;
pub use packet::{decode, PacketKind};
pub use publisher::SnapshotPublisher;
