use types::config::PackageConfig;

pub const PACKAGE_NAME: &str = "atlassian-jira-servicedesk";
pub const ARCHITECTURE: &str = "all";
pub const TARGET_DIR: &str = "/tmp";
pub const FEED_URL: &str =
    "https://my.atlassian.com/download/feeds/current/jira-servicedesk.json";

pub fn default_config() -> PackageConfig {
    let mut config = PackageConfig::default_config();
    config.name = PACKAGE_NAME.to_string();
    config.architecture = ARCHITECTURE.to_string();
    config.description = "Atlassian Jira Service Desk".to_string();
    config.homepage = Some("https://www.atlassian.com/software/jira/service-desk".to_string());
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_fixes_name_and_architecture() {
        let config = default_config();
        assert_eq!(config.name, "atlassian-jira-servicedesk");
        assert_eq!(config.architecture, "all");
    }
}
