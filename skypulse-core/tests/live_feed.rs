//! Live-mode timer behaviour under paused tokio time.

use std::time::Duration;

use skypulse_core::brand::BrandProfile;
use skypulse_core::feed::{FeedGenerator, LiveFeed};
use skypulse_core::log::MAX_REVIEWS;
use skypulse_core::monitor::Monitor;
use tokio::sync::mpsc;

#[tokio::test(start_paused = true)]
async fn emits_one_entry_per_interval() {
    let brand = BrandProfile::etihad();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let feed = LiveFeed::start(FeedGenerator::with_seed(brand.catalog, 1), brand.feed_interval, tx);

    // Nothing before the first full interval.
    tokio::time::sleep(Duration::from_secs(6)).await;
    assert!(rx.try_recv().is_err());

    tokio::time::sleep(Duration::from_secs(1)).await;
    tokio::task::yield_now().await;
    assert!(rx.try_recv().is_ok());

    tokio::time::sleep(Duration::from_secs(14)).await;
    tokio::task::yield_now().await;
    let mut count = 0;
    while rx.try_recv().is_ok() {
        count += 1;
    }
    assert_eq!(count, 2);
    assert!(feed.is_running());
}

#[tokio::test(start_paused = true)]
async fn stopping_the_feed_produces_nothing_further() {
    let brand = BrandProfile::meridian();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let feed = LiveFeed::start(FeedGenerator::with_seed(brand.catalog, 2), brand.feed_interval, tx);

    tokio::time::sleep(Duration::from_secs(13)).await;
    tokio::task::yield_now().await;
    let mut before_stop = 0;
    while rx.try_recv().is_ok() {
        before_stop += 1;
    }
    assert_eq!(before_stop, 2);

    feed.stop();
    tokio::time::sleep(Duration::from_secs(60)).await;
    tokio::task::yield_now().await;
    // Sender was dropped with the aborted task; the channel is closed and empty.
    assert!(rx.recv().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn log_stays_bounded_and_newest_first_under_live_feed() {
    let brand = BrandProfile::etihad().with_feed_interval(Duration::from_millis(100));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _feed = LiveFeed::start(FeedGenerator::with_seed(brand.catalog, 3), brand.feed_interval, tx);

    let mut monitor = Monitor::new(brand);
    monitor.set_live(true);
    for _ in 0..120 {
        let entry = rx.recv().await.unwrap();
        let id = entry.id.clone();
        monitor.ingest_live(entry);
        assert!(monitor.log().len() <= MAX_REVIEWS);
        assert_eq!(monitor.log().iter().next().unwrap().id, id);
    }
    assert_eq!(monitor.log().len(), MAX_REVIEWS);

    let stamps: Vec<_> = monitor.log().iter().map(|e| e.timestamp).collect();
    assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
}
