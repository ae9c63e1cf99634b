/// Shared, always-consistent view of the latest snapshot
use std::sync::Arc;

use log::debug;
use tokio::sync::watch;

use crate::metrics::apply_derived;
use crate::models::WeatherSnapshot;

/// Holds the published snapshot. Each publish produces a new snapshot and
/// swaps it in whole, so a reader never observes half of a cycle.
#[derive(Debug)]
pub struct SnapshotPublisher {
    sender: watch::Sender<Arc<WeatherSnapshot>>,
}

impl SnapshotPublisher {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Arc::new(WeatherSnapshot::new()));
        SnapshotPublisher { sender }
    }

    /// Merge the set fields of `update` into the published snapshot and
    /// recompute derived metrics.
    pub fn publish(&self, update: &WeatherSnapshot) {
        self.sender.send_modify(|published| {
            let mut next = WeatherSnapshot::clone(published);
            next.merge_from(update);
            apply_derived(&mut next);
            *published = Arc::new(next);
        });
        debug!("Published snapshot, {} subscriber(s)", self.sender.receiver_count());
    }

    pub fn latest(&self) -> Arc<WeatherSnapshot> {
        Arc::clone(&self.sender.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<WeatherSnapshot>> {
        self.sender.subscribe()
    }
}

impl Default for SnapshotPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_merges_and_derives() {
        let publisher = SnapshotPublisher::new();

        let mut first = WeatherSnapshot::new();
        first.current.outside_temperature = Some(90.0);
        first.current.outside_humidity = Some(70);
        first.accumulators.month_rain = Some(1.5);
        publisher.publish(&first);

        let mut second = WeatherSnapshot::new();
        second.current.barometer = Some(29.95);
        publisher.publish(&second);

        let latest = publisher.latest();
        assert_eq!(latest.current.barometer, Some(29.95));
        assert_eq!(latest.accumulators.month_rain, Some(1.5));
        assert_eq!(latest.current.outside_temperature, Some(90.0));
        let heat = latest.derived.heat_index_derived.unwrap();
        assert!((heat - 105.922021).abs() < 1e-6);
    }

    #[test]
    fn earlier_handles_keep_their_cycle() {
        let publisher = SnapshotPublisher::new();
        let before = publisher.latest();

        let mut update = WeatherSnapshot::new();
        update.current.wind_speed = Some(12);
        publisher.publish(&update);

        assert_eq!(before.current.wind_speed, None);
        assert_eq!(publisher.latest().current.wind_speed, Some(12));
    }

    #[tokio::test]
    async fn subscribers_are_notified() {
        let publisher = SnapshotPublisher::new();
        let mut receiver = publisher.subscribe();

        let mut update = WeatherSnapshot::new();
        update.current.rain_rate = Some(0.25);
        publisher.publish(&update);

        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow().current.rain_rate, Some(0.25));
    }
}
