//! Wire shapes of the two public JSON documents. Only the consumed fields
//! are declared; serde ignores the rest.

use serde::Deserialize;

use super::{Post, SubredditSnapshot};

// ─── /r/{sub}/about.json ─────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct AboutResponse {
    #[serde(default)]
    pub data: AboutData,
}

/// `null` and absent are treated alike; upstream sends
/// `"active_user_count": null` for some subreddits.
#[derive(Debug, Default, Deserialize)]
pub struct AboutData {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub subscribers: Option<u64>,
    #[serde(default)]
    pub active_user_count: Option<u64>,
}

// ─── /r/{sub}/new.json ───────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListingResponse {
    #[serde(default)]
    pub data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<ListingChild>,
}

/// A child without its `data` object is a shape error, not an empty post.
#[derive(Debug, Deserialize)]
pub struct ListingChild {
    pub data: PostData,
}

#[derive(Debug, Default, Deserialize)]
pub struct PostData {
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: u64,
    #[serde(default)]
    pub title: String,
}

// ─── Conversion ──────────────────────────────────────────────────

impl SubredditSnapshot {
    /// Merge both documents, applying the defaults for missing fields.
    pub fn from_payloads(
        configured_name: &str,
        about: AboutResponse,
        listing: ListingResponse,
    ) -> Self {
        let AboutData {
            display_name,
            subscribers,
            active_user_count,
        } = about.data;

        Self {
            display_name: display_name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| configured_name.to_string()),
            subscribers: subscribers.unwrap_or(0),
            active_user_count: active_user_count.unwrap_or(0),
            posts: listing
                .data
                .children
                .into_iter()
                .map(|c| Post {
                    score: c.data.score,
                    num_comments: c.data.num_comments,
                    title: c.data.title,
                })
                .collect(),
        }
    }
}
