pub mod article;
pub mod category;
pub mod config;
pub mod error;
pub mod fetch;
pub mod parser;
pub mod text;

pub use article::{merge_articles, Article};
pub use category::category_names;
pub use config::FeedConfig;
pub use error::FeedError;
pub use fetch::{fetch_all, HttpFetcher};
#[allow(unused_imports)]
pub use parser::{parse_feed, sniff_format, AtomParser, FeedFormat, FeedParser, RssParser};
