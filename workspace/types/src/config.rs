use log::info;
use serde::Deserialize;
use std::{fs, io, path::Path};
use thiserror::Error;

use crate::defaults::{MAINTAINER, PRIORITY, SECTION};
use crate::version::{PackageVersion, VersionError};

/// Errors that can occur while reading the configuration overlay file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error parsing TOML content
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("parameter {0} missing")]
    MissingParameter(&'static str),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Version(#[from] VersionError),
}

/// The full set of packaging fields handed to the package assembler.
///
/// `name` and `architecture` are fixed by the product constants before any
/// overlay runs; `version` is the only field with a required-value check
/// after resolution. The remaining fields pass straight into the control
/// file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PackageConfig {
    pub name: String,
    pub version: String,
    pub architecture: String,
    pub section: String,
    pub priority: String,
    pub maintainer: String,
    pub description: String,
    pub depends: Option<String>,
    pub homepage: Option<String>,
}

impl PackageConfig {
    /// Baseline configuration. The product context fills `name`,
    /// `architecture` and `description`; `version` stays empty until an
    /// overlay or flag provides it.
    pub fn default_config() -> Self {
        PackageConfig {
            name: String::new(),
            version: String::new(),
            architecture: String::new(),
            section: SECTION.to_string(),
            priority: PRIORITY.to_string(),
            maintainer: MAINTAINER.to_string(),
            description: String::new(),
            depends: None,
            homepage: None,
        }
    }

    /// Applies an explicit version override after validating it against
    /// Debian version syntax. Consumes and returns the configuration; there
    /// is no shared builder state.
    pub fn with_version(mut self, version: &str) -> Result<Self, VersionError> {
        let version = PackageVersion::try_from(version)?;
        self.version = version.into_string();
        Ok(self)
    }
}

/// File-declared partial configuration. Only the fields the file sets
/// replace the corresponding base fields; everything else passes through
/// unchanged. `name` and `architecture` are deliberately absent: the file
/// has no say over them.
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
pub struct ConfigOverlay {
    pub version: Option<String>,
    pub section: Option<String>,
    pub priority: Option<String>,
    pub maintainer: Option<String>,
    pub description: Option<String>,
    pub depends: Option<String>,
    pub homepage: Option<String>,
}

impl ConfigOverlay {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn apply(self, mut base: PackageConfig) -> PackageConfig {
        if let Some(version) = self.version {
            base.version = version;
        }
        if let Some(section) = self.section {
            base.section = section;
        }
        if let Some(priority) = self.priority {
            base.priority = priority;
        }
        if let Some(maintainer) = self.maintainer {
            base.maintainer = maintainer;
        }
        if let Some(description) = self.description {
            base.description = description;
        }
        if let Some(depends) = self.depends {
            base.depends = Some(depends);
        }
        if let Some(homepage) = self.homepage {
            base.homepage = Some(homepage);
        }
        base
    }
}

/// Resolves one final configuration from a default, an optional overlay
/// file and an optional explicit version, in that precedence order.
///
/// An empty explicit version counts as absent, so a default with no version
/// from any source fails the final check rather than the override step.
/// Deterministic: identical inputs always produce the identical result.
pub fn resolve_config(
    default: PackageConfig,
    config_path: Option<&Path>,
    version: Option<&str>,
) -> Result<PackageConfig, ResolveError> {
    let version = version.filter(|v| !v.is_empty());

    let mut config = default;
    if let Some(path) = config_path {
        let overlay = ConfigOverlay::from_file(path)?;
        info!("applying config overlay from {}", path.display());
        config = overlay.apply(config);
    }
    if let Some(version) = version {
        config = config.with_version(version)?;
    }
    if config.version.is_empty() {
        return Err(ResolveError::MissingParameter("version"));
    }
    Ok(config)
}
