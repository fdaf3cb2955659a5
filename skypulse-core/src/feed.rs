//! Mock feed generator and the live-mode timer that drives it.
//!
//! `FeedGenerator` draws canned reviews uniformly at random from a brand
//! catalog. `LiveFeed` owns a tokio interval task that emits one generated
//! entry per tick over an unbounded channel. Stopping or dropping the handle
//! aborts the task, so nothing is produced once live mode is off.

use std::time::Duration;

use chrono::Local;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::types::{CannedReview, ReviewEntry};

/// Draws mock reviews from a fixed catalog.
pub struct FeedGenerator {
    catalog: &'static [CannedReview],
    rng: StdRng,
}

impl FeedGenerator {
    pub fn new(catalog: &'static [CannedReview]) -> Self {
        Self { catalog, rng: StdRng::from_entropy() }
    }

    /// Deterministic generator for tests and replays.
    pub fn with_seed(catalog: &'static [CannedReview], seed: u64) -> Self {
        Self { catalog, rng: StdRng::seed_from_u64(seed) }
    }

    /// Picks one catalog entry and stamps it with a fresh id and the current time.
    ///
    /// Returns `None` only for an empty catalog.
    pub fn next_entry(&mut self) -> Option<ReviewEntry> {
        let pick = self.catalog.choose(&mut self.rng)?;
        Some(ReviewEntry::new(pick.text, pick.source, Local::now()))
    }
}

/// Stamps the given canned reviews as fresh entries, preserving their order.
pub fn stamp_all(canned: &[CannedReview]) -> Vec<ReviewEntry> {
    let now = Local::now();
    canned
        .iter()
        .map(|c| ReviewEntry::new(c.text, c.source, now))
        .collect()
}

/// Handle to the running live-mode timer.
///
/// The first entry is emitted one full `period` after [`LiveFeed::start`],
/// matching a fresh `setInterval`-style cadence rather than firing immediately.
pub struct LiveFeed {
    task: JoinHandle<()>,
}

impl LiveFeed {
    /// Spawns the timer task on the current tokio runtime.
    ///
    /// The task exits on its own once the receiver side of `tx` is dropped.
    pub fn start(
        mut generator: FeedGenerator,
        period: Duration,
        tx: UnboundedSender<ReviewEntry>,
    ) -> Self {
        let period = period.max(Duration::from_millis(1));
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(entry) = generator.next_entry() else {
                    tracing::warn!("feed catalog is empty; stopping live feed");
                    return;
                };
                if tx.send(entry).is_err() {
                    return;
                }
            }
        });
        Self { task }
    }

    /// Cancels the timer. No entry is sent after this returns.
    pub fn stop(self) {
        // Drop does the work.
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::BrandProfile;

    #[test]
    fn generator_draws_from_catalog() {
        let brand = BrandProfile::etihad();
        let mut generator = FeedGenerator::with_seed(brand.catalog, 7);
        for _ in 0..20 {
            let entry = generator.next_entry().unwrap();
            assert!(brand.catalog.iter().any(|c| c.text == entry.text && c.source == entry.source));
        }
    }

    #[test]
    fn empty_catalog_yields_nothing() {
        let mut generator = FeedGenerator::with_seed(&[], 1);
        assert!(generator.next_entry().is_none());
    }

    #[test]
    fn stamp_all_keeps_order() {
        let brand = BrandProfile::meridian();
        let entries = stamp_all(brand.seed());
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].text, brand.catalog[0].text);
    }
}
