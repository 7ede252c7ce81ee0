use std::time::Duration;

use async_trait::async_trait;

/// Time source for the scrape loop.
///
/// Wall-clock readings feed the `last_scrape` gauge and the log lines; the
/// sleep between cycles is a fixed duration, never a deadline, so clock
/// jumps only shift timestamps.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch.
    fn unix_now(&self) -> i64;

    /// Local time of day as `HH:MM:SS`.
    fn local_hms(&self) -> String;

    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn unix_now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }

    fn local_hms(&self) -> String {
        chrono::Local::now().format("%H:%M:%S").to_string()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
