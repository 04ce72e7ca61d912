/// Control-file defaults shared by every product configuration. A config
/// file overlay may replace any of them.
pub const SECTION: &str = "web";
pub const PRIORITY: &str = "optional";
pub const MAINTAINER: &str = "Atlassian Deb Tools <packages@localhost>";
