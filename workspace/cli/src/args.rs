use atlassian::confluence;
use clap::Parser;

/// Builds a Debian package out of an Atlassian Confluence release archive.
#[derive(Debug, Parser)]
#[clap(author, version, about, disable_version_flag = true)]
pub struct CreateDebArgs {
    /// path to the application tar.gz archive to package
    #[clap(long)]
    pub path: Option<String>,

    /// package version, overrides the config file value
    #[clap(long)]
    pub version: Option<String>,

    /// application version naming the directory inside the archive,
    /// derived from --version if not given
    #[clap(long)]
    pub atlassian_version: Option<String>,

    /// path to a TOML config file overriding package defaults
    #[clap(long)]
    pub config: Option<String>,

    /// directory the finished .deb is written to
    #[clap(long, default_value = confluence::TARGET_DIR)]
    pub target: String,
}

/// Prints the latest Jira Service Desk version listed in the Atlassian
/// download feed.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct LatestVersionArgs {
    /// log level: error, warn, info, debug or trace
    #[clap(long, default_value = "info")]
    pub loglevel: String,
}
