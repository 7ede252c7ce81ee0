use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::payload::{AboutResponse, ListingResponse};
use super::{FeedSource, SubredditSnapshot};
use crate::error::FeedError;

/// Public read-only endpoints; no OAuth needed.
pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";

pub const DEFAULT_USER_AGENT: &str = "PrometheusRedditExporter/1.0";

/// Upper bound on posts requested per cycle.
pub const POSTS_LIMIT: u32 = 50;

/// Fetches `about.json` and `new.json` for a subreddit.
///
/// The two requests run concurrently, each bounded by the client timeout,
/// so a fetch returns or fails within one timeout budget.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: Client,
    base_url: String,
}

impl FeedClient {
    pub fn new(
        base_url: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, FeedError> {
        let response = match self.http.get(&url).send().await {
            Ok(r) => r,
            Err(source) => return Err(FeedError::Request { url, source }),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = match response.bytes().await {
            Ok(b) => b,
            Err(source) => return Err(FeedError::Request { url, source }),
        };

        serde_json::from_slice(&body).map_err(|source| FeedError::Decode { url, source })
    }
}

#[async_trait]
impl FeedSource for FeedClient {
    async fn fetch(&self, subreddit: &str) -> Result<SubredditSnapshot, FeedError> {
        let base = format!("{}/r/{}", self.base_url, subreddit);
        let about_url = format!("{base}/about.json");
        let posts_url = format!("{base}/new.json?limit={POSTS_LIMIT}");

        let (about, listing) = tokio::try_join!(
            self.get_json::<AboutResponse>(about_url),
            self.get_json::<ListingResponse>(posts_url),
        )?;

        let snapshot = SubredditSnapshot::from_payloads(subreddit, about, listing);
        debug!(
            subreddit,
            posts = snapshot.posts.len(),
            subscribers = snapshot.subscribers,
            "fetched subreddit feed"
        );
        Ok(snapshot)
    }
}
