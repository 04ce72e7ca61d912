use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum VersionError {
    #[error("empty version string")]
    Empty,

    #[error("malformed package version '{0}'")]
    InvalidSyntax(String),
}

/// A package version that passed Debian version syntax checks: an optional
/// numeric epoch, an upstream part starting with a digit, and optional
/// `-`-separated revision parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageVersion {
    original_string: String,
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:[0-9]+:)?[0-9][A-Za-z0-9.+~]*(?:-[A-Za-z0-9.+~]+)*$")
            .expect("version pattern is valid")
    })
}

impl PackageVersion {
    pub fn as_str(&self) -> &str {
        &self.original_string
    }

    pub fn into_string(self) -> String {
        self.original_string
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original_string)
    }
}

impl<'a> TryFrom<&'a str> for PackageVersion {
    type Error = VersionError;

    fn try_from(s: &'a str) -> Result<Self, Self::Error> {
        if s.is_empty() {
            return Err(VersionError::Empty);
        }
        if !version_pattern().is_match(s) {
            return Err(VersionError::InvalidSyntax(s.to_string()));
        }
        Ok(PackageVersion {
            original_string: s.to_string(),
        })
    }
}

impl TryFrom<String> for PackageVersion {
    type Error = VersionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        <PackageVersion as TryFrom<&str>>::try_from(&s)
    }
}

/// Upstream product version of a compound package version: everything before
/// the first `-`, or the whole string when no `-` exists.
///
/// A leading separator yields an empty upstream version; that is the caller's
/// problem, not this function's.
pub fn upstream_version(version: &str) -> &str {
    match version.find('-') {
        Some(pos) => &version[..pos],
        None => version,
    }
}
