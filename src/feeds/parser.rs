//! RSS and Atom parsing by pattern matching over the raw markup.
//!
//! This is a best-effort scraper: there is no schema validation, and missing fields fall back
//! to placeholders rather than failing the item.

use super::article::{Article, NO_LINK, NO_TITLE};
use super::category::infer_category;
use super::error::FeedError;
use super::text::{clean_description, clean_title};
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static ROOT_ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*(?:(?:<\?.*?\?>|<!--.*?-->|<!DOCTYPE[^>]*>)\s*)*<([A-Za-z_][\w:.-]*)")
        .unwrap()
});

static RSS_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<item\b[^>]*>(.*?)</item>").unwrap());
static RSS_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<link\b[^>]*>(.*?)</link>").unwrap());
static RSS_PUB_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<pubDate\b[^>]*>(.*?)</pubDate>").unwrap());
static RSS_DC_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<dc:date\b[^>]*>(.*?)</dc:date>").unwrap());
static RSS_DESCRIPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<description\b[^>]*>(.*?)</description>").unwrap());

static ATOM_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<entry\b[^>]*>(.*?)</entry>").unwrap());
static ATOM_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<link\b([^>]*)>").unwrap());
static ATOM_UPDATED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<updated\b[^>]*>(.*?)</updated>").unwrap());
static ATOM_PUBLISHED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<published\b[^>]*>(.*?)</published>").unwrap());
static ATOM_SUMMARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<summary\b[^>]*>(.*?)</summary>").unwrap());
static ATOM_CONTENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<content\b[^>]*>(.*?)</content>").unwrap());

static TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title>").unwrap());
static HREF_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\bhref\s*=\s*["']([^"']*)["']"#).unwrap());
static REL_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\brel\s*=\s*["']([^"']*)["']"#).unwrap());

/// Wire format of a feed document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    /// `<rss>` or RSS 1.0 `<rdf:RDF>`, item based
    Rss,
    /// `<feed>`, entry based
    Atom,
}

/// Turns one feed document into articles
pub trait FeedParser {
    fn parse(&self, markup: &str, source: &str, now: DateTime<Utc>) -> Vec<Article>;
}

pub struct RssParser;

pub struct AtomParser;

impl FeedParser for RssParser {
    fn parse(&self, markup: &str, source: &str, now: DateTime<Utc>) -> Vec<Article> {
        RSS_ITEM
            .captures_iter(markup)
            .map(|caps| {
                let item = caps.get(1).map_or("", |m| m.as_str());
                let title = first_capture(&TITLE, item);
                let link = first_capture(&RSS_LINK, item).map(|l| clean_title(&l));
                let date = first_capture(&RSS_PUB_DATE, item)
                    .or_else(|| first_capture(&RSS_DC_DATE, item));
                let description = first_capture(&RSS_DESCRIPTION, item);
                build_article(title, link, date, description, source, now)
            })
            .collect()
    }
}

impl FeedParser for AtomParser {
    fn parse(&self, markup: &str, source: &str, now: DateTime<Utc>) -> Vec<Article> {
        ATOM_ENTRY
            .captures_iter(markup)
            .map(|caps| {
                let entry = caps.get(1).map_or("", |m| m.as_str());
                let title = first_capture(&TITLE, entry);
                let link = atom_link(entry);
                let date = first_capture(&ATOM_UPDATED, entry)
                    .or_else(|| first_capture(&ATOM_PUBLISHED, entry));
                let description = first_capture(&ATOM_SUMMARY, entry)
                    .or_else(|| first_capture(&ATOM_CONTENT, entry));
                build_article(title, link, date, description, source, now)
            })
            .collect()
    }
}

/// Detect the format from the root element, skipping the XML prolog, comments and doctype
pub fn sniff_format(markup: &str) -> Result<FeedFormat, FeedError> {
    let markup = markup.trim_start_matches('\u{feff}');
    let root = ROOT_ELEMENT
        .captures(markup)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| FeedError::UnknownFormat(String::new()))?;

    let local_name = root.rsplit(':').next().unwrap_or(root);
    match local_name {
        "rss" | "RDF" => Ok(FeedFormat::Rss),
        "feed" => Ok(FeedFormat::Atom),
        _ => Err(FeedError::UnknownFormat(root.to_string())),
    }
}

pub fn parser_for(format: FeedFormat) -> &'static dyn FeedParser {
    match format {
        FeedFormat::Rss => &RssParser,
        FeedFormat::Atom => &AtomParser,
    }
}

/// Sniff the format of `markup` and parse it with the matching parser
pub fn parse_feed(markup: &str, source: &str, now: DateTime<Utc>) -> Result<Vec<Article>, FeedError> {
    let format = sniff_format(markup)?;
    let articles = parser_for(format).parse(markup, source, now);
    log::debug!("Parsed {} {:?} articles from {}", articles.len(), format, source);
    Ok(articles)
}

/// Parse an RFC 2822 (RSS) or RFC 3339 (Atom) timestamp, or a bare date taken as UTC midnight
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
}

fn first_capture(pattern: &Regex, block: &str) -> Option<String> {
    pattern
        .captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// The `alternate` link of an entry, or its first link with an href
fn atom_link(entry: &str) -> Option<String> {
    let links: Vec<(Option<String>, String)> = ATOM_LINK
        .captures_iter(entry)
        .filter_map(|caps| {
            let attrs = caps.get(1)?.as_str();
            let href = first_capture(&HREF_ATTR, attrs)?;
            Some((first_capture(&REL_ATTR, attrs), href))
        })
        .collect();

    links
        .iter()
        .find(|(rel, _)| rel.as_deref().map_or(true, |r| r == "alternate"))
        .or_else(|| links.first())
        .map(|(_, href)| clean_title(href))
}

fn build_article(
    title: Option<String>,
    link: Option<String>,
    date: Option<String>,
    description: Option<String>,
    source: &str,
    now: DateTime<Utc>,
) -> Article {
    let title = title
        .map(|t| clean_title(&t))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());
    let link = link
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| NO_LINK.to_string());
    let date = match date {
        Some(raw) => parse_date(&raw).unwrap_or_else(|| {
            log::debug!("Unparseable date '{}' in {}, using current time", raw.trim(), source);
            now
        }),
        None => now,
    };
    let description = description.map(|d| clean_description(&d)).unwrap_or_default();
    let category = infer_category(&title, &description).to_string();

    Article {
        title,
        link,
        date,
        source: source.to_string(),
        category,
        description,
    }
}
