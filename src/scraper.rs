use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::aggregate::aggregate;
use crate::clock::Clock;
use crate::error::{FeedError, RegistryError};
use crate::feed::FeedSource;
use crate::metrics::catalog::{LAST_SCRAPE_UNIX, UP};
use crate::metrics::{Labels, Registry};

/// Consecutive failed cycles before the outage is logged at warn level.
const OUTAGE_WARN_AFTER: u32 = 10;

/// Result of one cycle that did not hit a fatal registry error.
#[derive(Debug)]
pub enum CycleOutcome {
    /// Upstream answered; all gauges were refreshed.
    Fresh { posts: usize, subscribers: u64 },
    /// Upstream failed; only `up` changed.
    Failed(FeedError),
}

/// Drives fetch → aggregate → update → sleep forever.
///
/// Cycles never overlap: a slow fetch just pushes the next one back. Feed
/// errors are absorbed here; only a registry label mismatch escapes.
pub struct Scraper<F, C> {
    feed: F,
    clock: C,
    registry: Arc<Registry>,
    subreddit: String,
    interval: Duration,
}

impl<F: FeedSource, C: Clock> Scraper<F, C> {
    pub fn new(
        feed: F,
        clock: C,
        registry: Arc<Registry>,
        subreddit: impl Into<String>,
        interval: Duration,
    ) -> Self {
        Self {
            feed,
            clock,
            registry,
            subreddit: subreddit.into(),
            interval,
        }
    }

    /// Loop until the process exits. Returns only on a fatal registry error.
    pub async fn run(self) -> RegistryError {
        info!(
            subreddit = %self.subreddit,
            interval_secs = self.interval.as_secs(),
            "scrape loop started"
        );

        let mut failures: u32 = 0;
        loop {
            match self.run_cycle().await {
                Ok(CycleOutcome::Fresh { posts, subscribers }) => {
                    if failures > 0 {
                        info!(failures, posts, subscribers, "upstream recovered");
                    }
                    failures = 0;
                }
                Ok(CycleOutcome::Failed(e)) => {
                    failures += 1;
                    if failures == OUTAGE_WARN_AFTER {
                        warn!(failures, error = %e, "upstream still failing, gauges are stale");
                    }
                }
                Err(e) => {
                    error!(error = %e, "scrape loop stopped");
                    return e;
                }
            }
            self.clock.sleep(self.interval).await;
        }
    }

    /// One fetch → aggregate → update pass, without the trailing sleep.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, RegistryError> {
        let started = Instant::now();
        // Cycle start, not fetch completion
        let started_unix = self.clock.unix_now();
        let global = Labels::none();

        match self.feed.fetch(&self.subreddit).await {
            Ok(snapshot) => {
                self.registry.apply(&aggregate(&snapshot))?;

                // Liveness last, so a fresh timestamp implies fresh gauges
                self.registry.set(UP, &global, 1.0)?;
                self.registry
                    .set(LAST_SCRAPE_UNIX, &global, started_unix as f64)?;

                println!(
                    "{}",
                    ok_line(
                        &self.clock.local_hms(),
                        &self.subreddit,
                        snapshot.posts.len(),
                        snapshot.subscribers,
                    )
                );
                debug!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "scrape cycle succeeded"
                );

                Ok(CycleOutcome::Fresh {
                    posts: snapshot.posts.len(),
                    subscribers: snapshot.subscribers,
                })
            }
            Err(e) => {
                println!("{}", error_line(&self.clock.local_hms(), &e));
                debug!(
                    error = ?e,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "scrape cycle failed"
                );

                self.registry.set(UP, &global, 0.0)?;
                Ok(CycleOutcome::Failed(e))
            }
        }
    }
}

// ─── Console lines ───────────────────────────────────────────────

fn ok_line(hms: &str, subreddit: &str, posts: usize, subscribers: u64) -> String {
    format!("[OK] {hms} r/{subreddit}: {posts} posts, {subscribers} subs")
}

fn error_line(hms: &str, err: &FeedError) -> String {
    format!("[ERROR] {hms} {err}")
}
