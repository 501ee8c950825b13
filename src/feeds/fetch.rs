use super::article::Article;
use super::error::FeedError;
use super::parser::parse_feed;
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use reqwest::Url;
use std::thread;
use std::time::Duration;

/// Retrieves the raw markup of a feed
pub trait FeedFetcher: Sync {
    fn fetch(&self, url: &str) -> Result<String, FeedError>;
}

/// Fetches feeds over HTTP. Construct once and share across aggregations.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("taxami/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl FeedFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FeedError> {
        let http_error = |source| FeedError::Http {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().map_err(http_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().map_err(http_error)
    }
}

/// Display name of a feed: its host without a leading `www.`
pub fn source_name(url: &str) -> Result<String, FeedError> {
    let parsed = Url::parse(url).map_err(|_| FeedError::InvalidUrl(url.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| FeedError::InvalidUrl(url.to_string()))?;
    Ok(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Fetch and parse a single feed
pub fn fetch_feed<F: FeedFetcher + ?Sized>(
    fetcher: &F,
    url: &str,
    now: DateTime<Utc>,
) -> Result<Vec<Article>, FeedError> {
    let source = source_name(url)?;
    let markup = fetcher.fetch(url)?;
    parse_feed(&markup, &source, now)
}

/// Fetch all feeds concurrently, one batch of articles per feed, in feed order.
/// A feed that cannot be fetched or parsed is logged and skipped.
pub fn fetch_all<F: FeedFetcher + ?Sized>(
    fetcher: &F,
    feeds: &[String],
    now: DateTime<Utc>,
) -> Vec<Vec<Article>> {
    thread::scope(|scope| {
        let handles: Vec<_> = feeds
            .iter()
            .map(|url| (url, scope.spawn(move || fetch_feed(fetcher, url, now))))
            .collect();

        handles
            .into_iter()
            .filter_map(|(url, handle)| match handle.join() {
                Ok(Ok(articles)) => {
                    log::info!("{} articles from {}", articles.len(), url);
                    Some(articles)
                }
                Ok(Err(err)) => {
                    log::warn!("Skipping feed {}: {}", url, err);
                    None
                }
                Err(_) => {
                    log::error!("Fetching {} panicked, skipping", url);
                    None
                }
            })
            .collect()
    })
}
