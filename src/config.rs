use std::time::Duration;

use clap::Parser;

use crate::error::ConfigError;
use crate::feed::client::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};

/// Exports subreddit statistics in Prometheus text format.
#[derive(Debug, Clone, Parser)]
#[command(name = "reddit-exporter", version)]
pub struct Config {
    /// Subreddit to watch (path segment, without "r/").
    #[arg(long, env = "SUBREDDIT", default_value = "technology")]
    pub subreddit: String,

    /// Seconds to sleep between scrape cycles.
    #[arg(
        long,
        env = "POLL_INTERVAL",
        default_value_t = 3,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_interval: u64,

    /// Host the /metrics endpoint binds to.
    #[arg(long, env = "EXPORTER_HOST", default_value = "localhost")]
    pub host: String,

    /// Port the /metrics endpoint binds to.
    #[arg(long, env = "EXPORTER_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Upstream base URL.
    #[arg(long, env = "REDDIT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub upstream: String,

    /// Per-request upstream timeout in seconds.
    #[arg(
        long,
        env = "REQUEST_TIMEOUT",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub request_timeout: u64,

    /// User-Agent sent with every upstream request.
    #[arg(long, env = "EXPORTER_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Config {
    /// Checks clap cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.subreddit.is_empty() || self.subreddit.contains('/') {
            return Err(ConfigError::InvalidSubreddit(self.subreddit.clone()));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// `host:port` as given, resolved later by the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        Config::try_parse_from(std::iter::once("reddit-exporter").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        // Explicit flags shadow whatever the test environment exports.
        let cfg = parse(&[
            "--subreddit=technology",
            "--poll-interval=3",
            "--host=localhost",
            "--port=8000",
        ])
        .unwrap();
        assert_eq!(cfg.subreddit, "technology");
        assert_eq!(cfg.poll_interval(), Duration::from_secs(3));
        assert_eq!(cfg.bind_addr(), "localhost:8000");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn overrides() {
        let cfg = parse(&[
            "--subreddit",
            "rust",
            "--poll-interval",
            "30",
            "--port",
            "9100",
            "--request-timeout",
            "2",
        ])
        .unwrap();
        assert_eq!(cfg.subreddit, "rust");
        assert_eq!(cfg.poll_interval(), Duration::from_secs(30));
        assert_eq!(cfg.port, 9100);
        assert_eq!(cfg.request_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(parse(&["--poll-interval", "0"]).is_err());
        assert!(parse(&["--request-timeout", "0"]).is_err());
    }

    #[test]
    fn subreddit_must_be_a_single_segment() {
        let cfg = parse(&["--subreddit", "r/rust"]).unwrap();
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidSubreddit("r/rust".into()))
        );

        let mut cfg = parse(&["--subreddit", "rust"]).unwrap();
        cfg.subreddit.clear();
        assert!(cfg.validate().is_err());
    }
}
