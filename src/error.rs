use thiserror::Error;

// ─── Upstream feed ───────────────────────────────────────────────

/// Anything that stops a fetch from producing a complete snapshot.
/// The scrape loop recovers from every variant.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Connection refused, DNS failure, timeout, ...
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Body was not JSON, or the JSON did not have the expected shape.
    #[error("invalid payload from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

// ─── Registry ────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A metric was written with a label-key set that differs from the one
    /// it was first registered with.
    #[error("label mismatch for {name}: registered with {expected:?}, got {found:?}")]
    LabelMismatch {
        name: &'static str,
        expected: Vec<&'static str>,
        found: Vec<&'static str>,
    },
}

// ─── Configuration ───────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid subreddit {0:?}: must be non-empty and contain no '/'")]
    InvalidSubreddit(String),
}

// ─── Top level ───────────────────────────────────────────────────

/// Fatal errors. Any of these ends the process with a non-zero status.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("metrics registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server exited with error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("scrape task ended unexpectedly: {0}")]
    ScrapeTask(#[from] tokio::task::JoinError),
}
