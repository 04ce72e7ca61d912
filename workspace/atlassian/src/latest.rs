use log::debug;
use std::cmp::Ordering;
use thiserror::Error;
use url::Url;

use crate::feed::{parse_version_informations, FeedError, FeedFetcher, VersionInfo};

#[derive(Debug, Error, PartialEq)]
pub enum SelectionError {
    #[error("version feed contains no entries")]
    EmptyFeed,
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid feed URL: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

// Feed versions are plain dotted strings like "3.16.1". Components compare
// numerically when both sides are numbers, lexically otherwise, and a longer
// version wins when a shorter one is its prefix.
fn compare_versions(left: &str, right: &str) -> Ordering {
    let left_parts: Vec<&str> = left.split('.').collect();
    let right_parts: Vec<&str> = right.split('.').collect();
    for (l, r) in left_parts.iter().zip(&right_parts) {
        let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
            (Ok(l), Ok(r)) => l.cmp(&r),
            _ => l.cmp(r),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    left_parts.len().cmp(&right_parts.len())
}

/// Picks the highest version out of a feed's entries.
pub fn latest_version(infos: &[VersionInfo]) -> Result<String, SelectionError> {
    let latest = infos
        .iter()
        .map(|info| info.version.as_str())
        .max_by(|a, b| compare_versions(a, b))
        .ok_or(SelectionError::EmptyFeed)?;
    debug!("Selected {} out of {} feed entries", latest, infos.len());
    Ok(latest.to_string())
}

/// Fetch, parse and select in one call, so the command line only has to
/// print the result.
pub struct LatestVersionQuery<F> {
    fetcher: F,
    feed_url: Url,
}

impl<F: FeedFetcher> LatestVersionQuery<F> {
    pub fn new(fetcher: F, feed_url: &str) -> Result<Self, QueryError> {
        Ok(LatestVersionQuery {
            fetcher,
            feed_url: Url::parse(feed_url)?,
        })
    }

    pub fn latest_version(&self) -> Result<String, QueryError> {
        let body = self.fetcher.fetch(&self.feed_url)?;
        let infos = parse_version_informations(&body)?;
        Ok(latest_version(&infos)?)
    }
}
