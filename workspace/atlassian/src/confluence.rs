use types::config::PackageConfig;

pub const PACKAGE_NAME: &str = "atlassian-confluence";
pub const ARCHITECTURE: &str = "all";
pub const TARGET_DIR: &str = "/tmp";
pub const FEED_URL: &str = "https://my.atlassian.com/download/feeds/current/confluence.json";

/// Baseline configuration for a Confluence package. Name and architecture
/// are fixed here and cannot be overridden by a config file.
pub fn default_config() -> PackageConfig {
    let mut config = PackageConfig::default_config();
    config.name = PACKAGE_NAME.to_string();
    config.architecture = ARCHITECTURE.to_string();
    config.description = "Atlassian Confluence team collaboration software".to_string();
    config.homepage = Some("https://www.atlassian.com/software/confluence".to_string());
    config
}
