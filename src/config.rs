use std::env;
use std::path::PathBuf;

use log::info;
use time::UtcOffset;

use crate::error::ConfigError;
use crate::utils::parse_utc_offset;

const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;

#[derive(Debug, Clone)]
pub struct StationConfig {
    pub capture_file: PathBuf,
    pub station_name: Option<String>,
    pub history_file: Option<PathBuf>,
    pub snapshot_file: Option<PathBuf>,
    pub poll_interval_secs: u64,
    /// Fixed station offset; `None` means detect the host's local offset.
    pub utc_offset: Option<UtcOffset>,
}

impl StationConfig {
    pub fn new() -> Result<Self, ConfigError> {
        // Load environment variables
        dotenv::dotenv().ok();

        let capture_file = optional("CAPTURE_FILE")
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing("CAPTURE_FILE"))?;

        let poll_interval_secs = match optional("POLL_INTERVAL_SECS") {
            Some(value) => parse_poll_interval(&value)?,
            None => DEFAULT_POLL_INTERVAL_SECS,
        };

        let utc_offset = optional("STATION_UTC_OFFSET")
            .map(|value| parse_station_offset(&value))
            .transpose()?;

        let config = StationConfig {
            capture_file,
            station_name: optional("STATION_NAME"),
            history_file: optional("HISTORY_FILE").map(PathBuf::from),
            snapshot_file: optional("SNAPSHOT_FILE").map(PathBuf::from),
            poll_interval_secs,
            utc_offset,
        };

        info!("Capture file: {}", config.capture_file.display());
        if let Some(name) = &config.station_name {
            info!("Station name: {}", name);
        }

        Ok(config)
    }
}

fn parse_poll_interval(value: &str) -> Result<u64, ConfigError> {
    value.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
        name: "POLL_INTERVAL_SECS",
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_station_offset(value: &str) -> Result<UtcOffset, ConfigError> {
    parse_utc_offset(value).map_err(|e| ConfigError::Invalid {
        name: "STATION_UTC_OFFSET",
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Value of `name`, treating an empty or whitespace-only value as absent.
fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::offset;

    #[test]
    fn poll_interval_must_be_whole_seconds() {
        assert_eq!(parse_poll_interval("5").unwrap(), 5);
        assert!(matches!(
            parse_poll_interval("2.5"),
            Err(ConfigError::Invalid {
                name: "POLL_INTERVAL_SECS",
                ..
            })
        ));
        assert!(parse_poll_interval("-1").is_err());
    }

    #[test]
    fn station_offset_needs_sign_and_minutes() {
        assert_eq!(parse_station_offset("-05:00").unwrap(), offset!(-5));
        assert_eq!(parse_station_offset("+09:30").unwrap(), offset!(+9:30));

        let err = parse_station_offset("EST").unwrap_err();
        match err {
            ConfigError::Invalid { name, value, .. } => {
                assert_eq!(name, "STATION_UTC_OFFSET");
                assert_eq!(value, "EST");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(parse_station_offset("5").is_err());
    }
}
