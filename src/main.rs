use std::path::Path;

use log::{error, info, warn};
use time::OffsetDateTime;
use tokio::io::AsyncWriteExt;
use tokio::time::{sleep, Duration};

use davis_vantage_etl::capture::{self, CapturedPacket};
use davis_vantage_etl::config::StationConfig;
use davis_vantage_etl::serialization::{to_history_record, to_json, HISTORY_RECORD_COLUMNS};
use davis_vantage_etl::utils::{duration_to_seconds, format_datetime};
use davis_vantage_etl::{
    decode, DecodeError, PacketKind, SnapshotPublisher, SystemClock, WeatherSnapshot,
};

/// Link statistics reported in the station group.
#[derive(Debug, Default)]
struct LinkStats {
    received: i32,
    missed: i32,
    crc_errors: i32,
}

impl LinkStats {
    fn record(&mut self, result: &Result<(), DecodeError>) {
        match result {
            Ok(()) => self.received = self.received.saturating_add(1),
            Err(e) => {
                self.missed = self.missed.saturating_add(1);
                if matches!(e, DecodeError::ChecksumMismatch { .. }) {
                    self.crc_errors = self.crc_errors.saturating_add(1);
                }
            }
        }
    }

    fn apply(&self, snapshot: &mut WeatherSnapshot) {
        snapshot.station.total_packets_received = Some(self.received);
        snapshot.station.total_packets_missed = Some(self.missed);
        snapshot.station.number_of_crc_errors_detected = Some(self.crc_errors);
    }
}

async fn append_history(path: &Path, snapshot: &WeatherSnapshot) -> std::io::Result<()> {
    let is_new = tokio::fs::metadata(path)
        .await
        .map(|meta| meta.len() == 0)
        .unwrap_or(true);

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;

    if is_new {
        file.write_all(HISTORY_RECORD_COLUMNS.as_bytes()).await?;
    }
    file.write_all(to_history_record(snapshot).as_bytes()).await?;
    file.flush().await
}

async fn write_snapshot(path: &Path, snapshot: &WeatherSnapshot) -> Result<(), Box<dyn std::error::Error>> {
    let document = to_json(snapshot)?;
    tokio::fs::write(path, document).await?;
    Ok(())
}

async fn replay_packet(
    packet: &CapturedPacket,
    config: &StationConfig,
    clock: &SystemClock,
    publisher: &SnapshotPublisher,
    stats: &mut LinkStats,
) {
    let mut update = WeatherSnapshot::new();
    let result = decode(packet.kind, &packet.bytes, &mut update, clock);
    stats.record(&result);

    if let Err(e) = &result {
        warn!("Dropped {} packet: {}", packet.kind, e);
    } else {
        update.stamp(OffsetDateTime::now_utc());
    }

    update.station.system_name = config.station_name.clone();
    stats.apply(&mut update);
    publisher.publish(&update);

    let latest = publisher.latest();

    if result.is_ok() && packet.kind == PacketKind::Loop2 {
        if let Some(path) = &config.history_file {
            if let Err(e) = append_history(path, &latest).await {
                error!("Failed to append history to {}: {}", path.display(), e);
            }
        }
    }

    if let Some(path) = &config.snapshot_file {
        if let Err(e) = write_snapshot(path, &latest).await {
            error!("Failed to write snapshot to {}: {}", path.display(), e);
        }
    }
}

async fn main_loop(config: StationConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting weather station replay service");

    let clock = match config.utc_offset {
        Some(offset) => SystemClock::with_offset(offset),
        None => SystemClock::detect(),
    };
    info!("Station UTC offset: {}", clock.offset());

    let packets = capture::load(&config.capture_file).await?;
    if packets.is_empty() {
        warn!("Capture file {} holds no packets", config.capture_file.display());
        return Ok(());
    }
    info!("Replaying {} captured packet(s)", packets.len());

    let publisher = SnapshotPublisher::new();
    let mut stats = LinkStats::default();
    let poll_interval = Duration::from_secs(config.poll_interval_secs);
    let mut pass: u64 = 0;

    loop {
        pass += 1;
        let start_time = OffsetDateTime::now_utc();
        info!("Starting pass {} at: {}", pass, format_datetime(&start_time));

        for packet in &packets {
            replay_packet(packet, &config, &clock, &publisher, &mut stats).await;
            sleep(poll_interval).await;
        }

        // Print summary
        let latest = publisher.latest();
        let elapsed = duration_to_seconds(OffsetDateTime::now_utc() - start_time);
        info!("Pass {} complete in {} s", pass, elapsed);
        info!(
            "  Packets received: {}, missed: {}, CRC errors: {}",
            stats.received, stats.missed, stats.crc_errors
        );
        if let Some(temperature) = latest.current.outside_temperature {
            info!("  Outside temperature: {:.1}°F", temperature);
        }
        if let Some(barometer) = latest.current.barometer {
            info!("  Barometer: {:.3} in Hg", barometer);
        }
        if stats.received == 0 {
            warn!("No packet in the capture decoded successfully!");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    // Load configuration
    let config = match StationConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Handle Ctrl+C gracefully
    let (tx, mut rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        let _ = tx.send(());
    });

    // Run main loop or wait for shutdown signal
    tokio::select! {
        result = main_loop(config) => {
            match result {
                Ok(_) => info!("Program completed successfully"),
                Err(e) => error!("Fatal error: {}", e),
            }
        }
        _ = &mut rx => {
            info!("Program terminated by user. Exiting gracefully.");
        }
    }

    Ok(())
}
