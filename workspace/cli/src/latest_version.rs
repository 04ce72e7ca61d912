use clap::Parser;
use env_logger::Env;
use std::io::Write;
use thiserror::Error;

use atlassian::feed::{FeedError, FeedFetcher, HttpFeedFetcher};
use atlassian::jira_servicedesk;
use atlassian::latest::{LatestVersionQuery, QueryError};

use super::args::LatestVersionArgs;

#[derive(Debug, Error)]
pub enum LatestVersionError {
    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

type Result<T> = std::result::Result<T, LatestVersionError>;

pub fn run_latest_version() -> Result<()> {
    let args = LatestVersionArgs::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.loglevel.as_str()))
        .init();

    let fetcher = HttpFeedFetcher::new()?;
    let query = LatestVersionQuery::new(fetcher, jira_servicedesk::FEED_URL)?;
    execute(&mut std::io::stdout(), &query)
}

/// Writes the latest feed version followed by a newline.
pub fn execute<W, F>(writer: &mut W, query: &LatestVersionQuery<F>) -> Result<()>
where
    W: Write,
    F: FeedFetcher,
{
    let version = query.latest_version()?;
    writeln!(writer, "{}", version)?;
    Ok(())
}
