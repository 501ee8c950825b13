use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const DEFAULT_FEEDS: &[&str] = &[
    "https://www.eutekne.it/rss/feed.xml",
    "https://www.commercialistatelematico.com/feed",
    "https://www.ilsole24ore.com/rss/fisco.xml",
];

pub const DEFAULT_LIMIT: usize = 30;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Feed aggregation settings, loadable from a JSON file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub feeds: Vec<String>,
    pub limit: usize,
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            feeds: DEFAULT_FEEDS.iter().map(|f| f.to_string()).collect(),
            limit: DEFAULT_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl FeedConfig {
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .map_err(|e| anyhow::anyhow!("could not open config {}: {}", path.display(), e))?;
        let config: FeedConfig = serde_json::from_reader(BufReader::new(file))?;
        log::debug!("Loaded feed config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Apply command line overrides on top of the loaded or default settings
    pub fn with_overrides(
        mut self,
        feeds: &[String],
        limit: Option<usize>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if !feeds.is_empty() {
            self.feeds = feeds.to_vec();
        }
        if let Some(limit) = limit {
            self.limit = limit;
        }
        if let Some(timeout_secs) = timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        self
    }
}
