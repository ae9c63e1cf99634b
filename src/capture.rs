/// Reader for recorded console traffic
///
/// One packet per line: the packet kind (`LOOP`, `LOOP2` or `HILOWS`, any
/// case) followed by the packet bytes in hex. Whitespace inside the hex is
/// ignored. Blank lines and lines starting with `#` are skipped.
use std::path::Path;

use log::debug;

use crate::error::CaptureError;
use crate::packet::PacketKind;

/// One recorded packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPacket {
    pub kind: PacketKind,
    pub bytes: Vec<u8>,
}

pub fn parse_capture(text: &str) -> Result<Vec<CapturedPacket>, CaptureError> {
    let mut packets = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (name, payload) = trimmed.split_once(char::is_whitespace).unwrap_or((trimmed, ""));
        let kind = PacketKind::from_name(name).ok_or_else(|| CaptureError::UnknownKind {
            line,
            kind: name.to_string(),
        })?;

        let digits: String = payload.split_whitespace().collect();
        if digits.is_empty() {
            return Err(CaptureError::MissingBytes { line });
        }
        let bytes = hex::decode(&digits).map_err(|source| CaptureError::InvalidHex { line, source })?;

        packets.push(CapturedPacket { kind, bytes });
    }

    Ok(packets)
}

/// Read and parse a capture file.
pub async fn load(path: impl AsRef<Path>) -> Result<Vec<CapturedPacket>, CaptureError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await?;
    let packets = parse_capture(&text)?;
    debug!("Loaded {} packet(s) from {}", packets.len(), path.display());
    Ok(packets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_kinds_and_bytes() {
        let text = "# recorded 2023-06-01\n\nloop2 4c4f 4f\nHILOWS 00ff\n";
        let packets = parse_capture(text).unwrap();
        assert_eq!(
            packets,
            vec![
                CapturedPacket {
                    kind: PacketKind::Loop2,
                    bytes: b"LOO".to_vec(),
                },
                CapturedPacket {
                    kind: PacketKind::HiLows,
                    bytes: vec![0x00, 0xFF],
                },
            ]
        );
    }

    #[test]
    fn reports_offending_line() {
        assert!(matches!(
            parse_capture("LOOP 00\nLOOP3 00\n"),
            Err(CaptureError::UnknownKind { line: 2, .. })
        ));
        assert!(matches!(
            parse_capture("LOOP\n"),
            Err(CaptureError::MissingBytes { line: 1 })
        ));
        assert!(matches!(
            parse_capture("\nLOOP 0g\n"),
            Err(CaptureError::InvalidHex { line: 2, .. })
        ));
    }

    #[tokio::test]
    async fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "LOOP 0a0d").unwrap();
        file.flush().unwrap();

        let packets = load(file.path()).await.unwrap();
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0].kind, PacketKind::Loop);
        assert_eq!(packets[0].bytes, vec![0x0A, 0x0D]);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load(dir.path().join("absent.cap")).await;
        assert!(matches!(result, Err(CaptureError::Io(_))));
    }
}
