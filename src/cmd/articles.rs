//! Articles command - aggregate fiscal news feeds

use crate::cmd::write_csv;
use crate::feeds::{
    category_names, fetch_all, merge_articles, parse_feed, Article, FeedConfig, FeedError,
    HttpFetcher,
};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tabled::{settings::Style, Table, Tabled};

const TITLE_WIDTH: usize = 80;

#[derive(Args, Debug)]
pub struct ArticlesCommand {
    /// Feed URL to aggregate (repeatable), replacing the configured feeds
    #[arg(short, long = "feed")]
    feeds: Vec<String>,

    /// JSON config file with `feeds`, `limit` and `timeout_secs`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Parse a local RSS/Atom file instead of fetching feeds
    #[arg(long, conflicts_with_all = ["feeds", "config"])]
    file: Option<PathBuf>,

    /// Source name for articles read with --file (defaults to the file name)
    #[arg(long, requires = "file")]
    source: Option<String>,

    /// Maximum number of articles
    #[arg(short, long)]
    limit: Option<usize>,

    /// HTTP timeout per feed, in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Only show articles in this category (e.g. IVA, forfetario, altro)
    #[arg(short, long)]
    category: Option<String>,

    /// Output as JSON instead of a table
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output as CSV instead of a table
    #[arg(long)]
    csv: bool,
}

#[derive(Tabled)]
struct ArticleRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Title")]
    title: String,
}

#[derive(Serialize)]
struct ArticleRecord<'a> {
    date: String,
    title: &'a str,
    link: &'a str,
    source: &'a str,
    category: &'a str,
}

impl ArticlesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let category = self.category_filter()?;
        let now = Utc::now();

        let (batches, limit) = match self.file {
            Some(ref path) => (vec![self.read_file(path, now)?], self.limit()),
            None => self.fetch(now)?,
        };

        // filter before merging, so the limit counts matching articles only
        let batches = batches.into_iter().map(|batch| match category {
            Some(category) => batch
                .into_iter()
                .filter(|a| a.category == category)
                .collect(),
            None => batch,
        });
        let articles = merge_articles(batches, limit);
        log::info!("{} articles selected", articles.len());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&articles)?);
        } else if self.csv {
            write_csv(articles.iter().map(ArticleRecord::from), io::stdout())?;
        } else {
            print_table(&articles);
        }
        Ok(())
    }

    /// Resolve the category filter to its canonical spelling
    fn category_filter(&self) -> anyhow::Result<Option<&'static str>> {
        let Some(ref requested) = self.category else {
            return Ok(None);
        };
        category_names()
            .find(|name| name.to_lowercase() == requested.to_lowercase())
            .map(Some)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "unknown category '{}', expected one of: {}",
                    requested,
                    category_names().collect::<Vec<_>>().join(", ")
                )
            })
    }

    fn config(&self) -> anyhow::Result<FeedConfig> {
        let config = match self.config {
            Some(ref path) => FeedConfig::from_json_file(path)?,
            None => FeedConfig::default(),
        };
        Ok(config.with_overrides(&self.feeds, self.limit, self.timeout))
    }

    fn limit(&self) -> usize {
        self.limit.unwrap_or(FeedConfig::default().limit)
    }

    fn fetch(&self, now: DateTime<Utc>) -> anyhow::Result<(Vec<Vec<Article>>, usize)> {
        let config = self.config()?;
        let fetcher = HttpFetcher::new(Duration::from_secs(config.timeout_secs))?;
        Ok((fetch_all(&fetcher, &config.feeds, now), config.limit))
    }

    fn read_file(&self, path: &Path, now: DateTime<Utc>) -> anyhow::Result<Vec<Article>> {
        let markup = fs::read_to_string(path).map_err(|source| FeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = self.source.clone().unwrap_or_else(|| {
            path.file_stem()
                .map_or("local".to_string(), |s| s.to_string_lossy().into_owned())
        });
        let articles = parse_feed(&markup, &source, now)?;
        log::info!("{} articles from {}", articles.len(), path.display());
        Ok(articles)
    }
}

impl<'a> From<&'a Article> for ArticleRecord<'a> {
    fn from(article: &'a Article) -> Self {
        ArticleRecord {
            date: article.date.to_rfc3339(),
            title: &article.title,
            link: &article.link,
            source: &article.source,
            category: &article.category,
        }
    }
}

fn print_table(articles: &[Article]) {
    if articles.is_empty() {
        println!("No articles found");
        return;
    }

    let rows: Vec<ArticleRow> = articles
        .iter()
        .map(|a| ArticleRow {
            date: a.date.format("%Y-%m-%d").to_string(),
            category: a.category.clone(),
            source: a.source.clone(),
            title: truncate(&a.title, TITLE_WIDTH),
        })
        .collect();

    println!();
    println!("ARTICLES ({})", rows.len());
    println!();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let head: String = text.chars().take(width - 1).collect();
        format!("{head}…")
    }
}
