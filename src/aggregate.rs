//! Pure transform from a fetched snapshot to gauge values. No I/O, no
//! clocks: identical input always yields an identical sample list.

use crate::feed::{Post, SubredditSnapshot};
use crate::metrics::catalog::{self, DOWNVOTE_ESTIMATE_FACTOR};
use crate::metrics::{Labels, MetricSample};

/// Derive every gauge for one cycle, labelled with the snapshot's display
/// name. With no posts only the subscriber and active-user gauges are
/// produced, so the post gauges keep their previous values.
pub fn aggregate(snapshot: &SubredditSnapshot) -> Vec<MetricSample> {
    let labels = Labels::subreddit(snapshot.display_name.as_str());
    let sample = |metric, value| MetricSample::new(metric, labels.clone(), value);

    let mut out = vec![
        sample(catalog::SUBSCRIBERS, snapshot.subscribers as f64),
        sample(catalog::ACTIVE_USERS, snapshot.active_user_count as f64),
    ];

    if let Some(stats) = PostStats::collect(&snapshot.posts) {
        let n = stats.count as f64;
        let total_upvotes = stats.score_sum as f64;

        out.extend([
            sample(catalog::POSTS_LAST_FETCH, n),
            sample(catalog::AVG_SCORE, total_upvotes / n),
            sample(catalog::AVG_COMMENTS, stats.comments_sum as f64 / n),
            sample(catalog::TOTAL_UPVOTES, total_upvotes),
            sample(
                catalog::TOTAL_DOWNVOTES,
                total_upvotes * DOWNVOTE_ESTIMATE_FACTOR,
            ),
            sample(catalog::TOP_POST_SCORE, stats.top.score as f64),
            sample(catalog::TOP_POST_COMMENTS, stats.top.num_comments as f64),
            sample(catalog::TITLE_LENGTH_AVG, stats.title_len_sum as f64 / n),
            sample(catalog::TITLE_LENGTH_MAX, stats.title_len_max as f64),
        ]);
    }

    out
}

/// Single pass over the listing.
struct PostStats<'a> {
    count: usize,
    score_sum: i64,
    comments_sum: u64,
    /// Highest score; the earliest post wins a tie.
    top: &'a Post,
    title_len_sum: usize,
    title_len_max: usize,
}

impl<'a> PostStats<'a> {
    fn collect(posts: &'a [Post]) -> Option<Self> {
        let (first, _) = posts.split_first()?;
        let mut stats = PostStats {
            count: 0,
            score_sum: 0,
            comments_sum: 0,
            top: first,
            title_len_sum: 0,
            title_len_max: 0,
        };

        for post in posts {
            // Characters, not bytes
            let title_len = post.title.chars().count();

            stats.count += 1;
            stats.score_sum += post.score;
            stats.comments_sum += post.num_comments;
            stats.title_len_sum += title_len;
            stats.title_len_max = stats.title_len_max.max(title_len);
            if post.score > stats.top.score {
                stats.top = post;
            }
        }

        Some(stats)
    }
}
