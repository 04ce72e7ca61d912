use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const JSONP_PREFIX: &str = "downloads(";
const JSONP_SUFFIX: &str = ")";

#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("feed request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("feed body is not valid UTF-8")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("feed body is not a downloads(...) document")]
    Jsonp,

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// One release entry from an Atlassian download feed. Only `version` is
/// guaranteed; the feeds omit fields per release type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub version: String,
    pub released: Option<String>,
    pub edition: Option<String>,
    pub zip_url: Option<String>,
    pub tar_url: Option<String>,
    pub md5: Option<String>,
    pub size: Option<String>,
    pub platform: Option<String>,
    #[serde(rename = "type")]
    pub release_type: Option<String>,
}

pub trait FeedFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FeedError>;
}

pub struct HttpFeedFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFeedFetcher {
    pub fn new() -> Result<Self, FeedError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("atlassian-deb-tools")
            .build()?;
        Ok(HttpFeedFetcher { client })
    }
}

impl FeedFetcher for HttpFeedFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FeedError> {
        info!("Fetching version feed from {}", url);
        let response = self.client.get(url.as_str()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}

/// Parses a feed body. The feeds are JSONP, a JSON array wrapped in a
/// `downloads(...)` call, so the wrapper is stripped first.
pub fn parse_version_informations(body: &[u8]) -> Result<Vec<VersionInfo>, FeedError> {
    let text = std::str::from_utf8(body)?;
    let json = text
        .trim()
        .strip_prefix(JSONP_PREFIX)
        .and_then(|rest| rest.strip_suffix(JSONP_SUFFIX))
        .ok_or(FeedError::Jsonp)?;
    let infos: Vec<VersionInfo> = serde_json::from_str(json)?;
    debug!("Feed contains {} entries", infos.len());
    Ok(infos)
}
