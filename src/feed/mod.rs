pub mod client;
pub mod payload;

use async_trait::async_trait;

use crate::error::FeedError;

pub use client::FeedClient;

/// Source of subreddit snapshots. Implemented by [`FeedClient`] over HTTP;
/// tests substitute scripted sources.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch a complete snapshot, or fail as a whole. Never returns a
    /// partially populated snapshot.
    async fn fetch(&self, subreddit: &str) -> Result<SubredditSnapshot, FeedError>;
}

/// Everything one cycle knows about a subreddit. Built per cycle, dropped
/// after aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct SubredditSnapshot {
    /// Upstream spelling of the name; falls back to the configured one.
    pub display_name: String,
    pub subscribers: u64,
    pub active_user_count: u64,
    /// Newest first, as upstream lists them.
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Post {
    pub score: i64,
    pub num_comments: u64,
    pub title: String,
}

impl Post {
    #[cfg(test)]
    pub fn new(score: i64, num_comments: u64, title: impl Into<String>) -> Self {
        Self {
            score,
            num_comments,
            title: title.into(),
        }
    }
}
