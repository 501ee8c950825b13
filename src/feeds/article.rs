use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Placeholder for items without a title
pub const NO_TITLE: &str = "No Title";
/// Placeholder for items without a link
pub const NO_LINK: &str = "#";

/// A normalized feed item, whichever format it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Article {
    pub title: String,
    pub link: String,
    /// Publication (or last update) time, normalized to UTC
    pub date: DateTime<Utc>,
    /// Host name of the feed, without a leading `www.`
    pub source: String,
    pub category: String,
    /// Plain-text description with markup removed
    #[serde(default)]
    pub description: String,
}

/// Merge per-feed batches into one list, newest first, keeping at most `limit` articles.
/// Articles with the same date keep their feed order.
pub fn merge_articles<I>(batches: I, limit: usize) -> Vec<Article>
where
    I: IntoIterator<Item = Vec<Article>>,
{
    let mut articles: Vec<Article> = batches.into_iter().flatten().collect();
    articles.sort_by(|a, b| b.date.cmp(&a.date));
    articles.truncate(limit);
    articles
}
