//! Every gauge the exporter can publish. Names are part of the external
//! contract with dashboards and alert rules; do not rename.

use super::MetricDesc;

/// The only label key used by subreddit gauges.
pub const SUBREDDIT_LABEL: &str = "subreddit";

/// Factor applied to total upvotes to estimate downvotes. Upstream does not
/// publish downvotes; dashboards built on this exporter expect this exact
/// factor.
pub const DOWNVOTE_ESTIMATE_FACTOR: f64 = 0.15;

// ─── Subreddit gauges (labelled by `subreddit`) ──────────────────

pub const SUBSCRIBERS: MetricDesc = MetricDesc {
    name: "reddit_subscribers",
    help: "Number of subreddit subscribers",
};

pub const ACTIVE_USERS: MetricDesc = MetricDesc {
    name: "reddit_active_users",
    help: "Number of currently active users",
};

pub const POSTS_LAST_FETCH: MetricDesc = MetricDesc {
    name: "reddit_posts_last_fetch",
    help: "Number of posts fetched last cycle",
};

pub const AVG_SCORE: MetricDesc = MetricDesc {
    name: "reddit_avg_score",
    help: "Average score (upvotes - downvotes) for fetched posts",
};

pub const AVG_COMMENTS: MetricDesc = MetricDesc {
    name: "reddit_avg_comments",
    help: "Average number of comments per post",
};

pub const TOTAL_UPVOTES: MetricDesc = MetricDesc {
    name: "reddit_total_upvotes",
    help: "Total upvotes for fetched posts",
};

pub const TOTAL_DOWNVOTES: MetricDesc = MetricDesc {
    name: "reddit_total_downvotes",
    help: "Estimated downvotes (approximation: 0.15 x total upvotes)",
};

pub const TOP_POST_SCORE: MetricDesc = MetricDesc {
    name: "reddit_top_post_score",
    help: "Score of top post in current batch",
};

pub const TOP_POST_COMMENTS: MetricDesc = MetricDesc {
    name: "reddit_top_post_comments",
    help: "Number of comments on top post",
};

pub const TITLE_LENGTH_AVG: MetricDesc = MetricDesc {
    name: "reddit_post_title_length_avg",
    help: "Average title length of posts",
};

pub const TITLE_LENGTH_MAX: MetricDesc = MetricDesc {
    name: "reddit_post_title_length_max",
    help: "Max title length among posts",
};

// ─── Exporter liveness (global) ──────────────────────────────────

pub const UP: MetricDesc = MetricDesc {
    name: "up",
    help: "Exporter status: 1 = healthy, 0 = error",
};

pub const LAST_SCRAPE_UNIX: MetricDesc = MetricDesc {
    name: "reddit_exporter_last_scrape_unix",
    help: "Unix timestamp of last successful scrape",
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique_and_valid() {
        let all = [
            SUBSCRIBERS,
            ACTIVE_USERS,
            POSTS_LAST_FETCH,
            AVG_SCORE,
            AVG_COMMENTS,
            TOTAL_UPVOTES,
            TOTAL_DOWNVOTES,
            TOP_POST_SCORE,
            TOP_POST_COMMENTS,
            TITLE_LENGTH_AVG,
            TITLE_LENGTH_MAX,
            UP,
            LAST_SCRAPE_UNIX,
        ];
        let names: HashSet<_> = all.iter().map(|m| m.name).collect();
        assert_eq!(names.len(), all.len());

        for m in all {
            assert!(
                m.name
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c == '_'),
                "bad metric name: {}",
                m.name
            );
            assert!(!m.help.is_empty());
        }
    }

    #[test]
    fn downvote_help_flags_the_estimate() {
        assert!(TOTAL_DOWNVOTES.help.contains("approximation"));
        assert!(TOTAL_DOWNVOTES.help.contains("0.15"));
    }
}
