/// Error types surfaced by the decoder, the interchange codec and the replay service
use thiserror::Error;

use crate::packet::PacketKind;

/// Why a raw console packet was rejected.
///
/// Every variant is recoverable. A decode call that returns one of these
/// has not touched the target snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("{kind} packet must be {expected} bytes, got {actual}")]
    InvalidLength {
        kind: PacketKind,
        expected: usize,
        actual: usize,
    },
    #[error("{kind} packet has byte {actual:#04x} at offset {offset}, expected {expected:#04x}")]
    InvalidMarker {
        kind: PacketKind,
        offset: usize,
        expected: u8,
        actual: u8,
    },
    #[error("checksum mismatch: packet carries {stored:#06x}, computed {computed:#06x}")]
    ChecksumMismatch { stored: u16, computed: u16 },
}

/// Failure to produce or read back an interchange document.
#[derive(Debug, Error)]
pub enum InterchangeError {
    #[error("malformed interchange document at {line}:{column}: {reason} (input: {excerpt:?})")]
    Malformed {
        reason: String,
        line: usize,
        column: usize,
        excerpt: String,
    },
    #[error("failed to encode interchange document: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Problems reading a packet capture file.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to read capture file: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: unknown packet kind {kind:?}")]
    UnknownKind { line: usize, kind: String },
    #[error("line {line}: missing packet bytes")]
    MissingBytes { line: usize },
    #[error("line {line}: invalid hex: {source}")]
    InvalidHex {
        line: usize,
        #[source]
        source: hex::FromHexError,
    },
}

/// Invalid or missing service configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}
